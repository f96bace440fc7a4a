// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Fixdesk backend.

use thiserror::Error;

/// The primary error type used across Fixdesk crates.
///
/// Remote-provider send failures are deliberately NOT represented here --
/// they are values (`fixdesk_whatsapp::SendOutcome`), because a failed or
/// skipped notification must never abort the enclosing operation.
#[derive(Debug, Error)]
pub enum FixdeskError {
    /// Configuration errors (invalid values, missing required settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Channel errors (server bind failure, malformed provider endpoint).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
