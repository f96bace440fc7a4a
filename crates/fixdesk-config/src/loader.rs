// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./fixdesk.toml` > `~/.config/fixdesk/fixdesk.toml`
//! > `/etc/fixdesk/fixdesk.toml` with environment variable overrides via
//! `FIXDESK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::FixdeskConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/fixdesk/fixdesk.toml` (system-wide)
/// 3. `~/.config/fixdesk/fixdesk.toml` (user XDG config)
/// 4. `./fixdesk.toml` (local directory)
/// 5. `FIXDESK_*` environment variables
pub fn load_config() -> Result<FixdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FixdeskConfig::default()))
        .merge(Toml::file("/etc/fixdesk/fixdesk.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("fixdesk/fixdesk.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("fixdesk.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<FixdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FixdeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FixdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FixdeskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example,
/// `FIXDESK_WHATSAPP_PHONE_NUMBER_ID` must map to `whatsapp.phone_number_id`,
/// not `whatsapp.phone.number.id`.
fn env_provider() -> Env {
    Env::prefixed("FIXDESK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: FIXDESK_WHATSAPP_VERIFY_TOKEN -> "whatsapp_verify_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("whatsapp_", "whatsapp.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
