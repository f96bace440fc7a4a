// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Fixdesk configuration system.

use fixdesk_config::diagnostic::ConfigError;
use fixdesk_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_fixdesk_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 8080
cors_allowed_origin = "https://dashboard.example.com"
log_level = "debug"

[whatsapp]
verify_token = "shared-secret"
phone_number_id = "109876543210"
access_token = "EAAG-test-token"
api_base_url = "https://graph.facebook.com/v21.0"

[storage]
database_path = "/tmp/fixdesk-test.db"
wal_mode = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(
        config.server.cors_allowed_origin,
        "https://dashboard.example.com"
    );
    assert_eq!(config.server.log_level, "debug");
    assert_eq!(config.whatsapp.verify_token.as_deref(), Some("shared-secret"));
    assert_eq!(
        config.whatsapp.phone_number_id.as_deref(),
        Some("109876543210")
    );
    assert!(config.whatsapp.has_credentials());
    assert_eq!(config.storage.database_path, "/tmp/fixdesk-test.db");
    assert!(!config.storage.wal_mode);
}

/// Empty TOML falls back to compiled defaults everywhere.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should deserialize");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.cors_allowed_origin, "http://localhost:5173");
    assert!(config.whatsapp.verify_token.is_none());
    assert!(!config.whatsapp.has_credentials());
    assert_eq!(
        config.whatsapp.api_base_url,
        "https://graph.facebook.com/v21.0"
    );
}

/// Partial sections keep defaults for omitted keys.
#[test]
fn partial_section_keeps_other_defaults() {
    let config = load_config_from_str("[server]\nport = 4000\n").unwrap();
    assert_eq!(config.server.port, 4000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.log_level, "info");
}

/// Unknown field in a section is rejected by deny_unknown_fields.
#[test]
fn unknown_field_in_server_produces_error() {
    let toml = r#"
[server]
prot = 8080
"#;
    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("prot"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_produces_error() {
    let toml = r#"
[telegram]
bot_token = "123:ABC"
"#;
    assert!(load_config_from_str(toml).is_err());
}

/// Missing credentials are not a validation failure -- messaging degrades
/// to a no-op instead.
#[test]
fn missing_whatsapp_credentials_still_validates() {
    let config = load_and_validate_str("").expect("defaults should validate");
    assert!(!config.whatsapp.has_credentials());
}

/// Validation failures are collected, not fail-fast.
#[test]
fn validation_errors_are_collected() {
    let toml = r#"
[server]
host = ""
log_level = "shout"
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors.len() >= 2);
    assert!(
        errors
            .iter()
            .all(|e| matches!(e, ConfigError::Validation { .. }))
    );
}

/// Type mismatches surface as figment errors.
#[test]
fn wrong_type_produces_error() {
    let toml = r#"
[server]
port = "not-a-port"
"#;
    assert!(load_config_from_str(toml).is_err());
}
