// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge.
//!
//! Converts Figment deserialization errors and post-deserialization
//! validation failures into miette diagnostics rendered at startup.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error carrying enough context for miette to render an
/// actionable startup message.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum ConfigError {
    /// The configuration failed to deserialize (unknown key, type mismatch).
    #[error("{message}")]
    #[diagnostic(
        code(fixdesk::config::invalid),
        help("check fixdesk.toml and FIXDESK_* environment variables")
    )]
    Invalid {
        /// Rendered figment error, including the offending key path.
        message: String,
    },

    /// A deserialized value violates a semantic constraint.
    #[error("{message}")]
    #[diagnostic(code(fixdesk::config::validation))]
    Validation {
        /// Description of the violated constraint.
        message: String,
    },
}

/// Convert a figment error (which may aggregate several failures) into one
/// `ConfigError` per underlying failure.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| ConfigError::Invalid {
            message: e.to_string(),
        })
        .collect()
}

/// Render all collected configuration errors to stderr via miette.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprintln!("{:?}", miette::Report::new(error.clone()));
    }
}
