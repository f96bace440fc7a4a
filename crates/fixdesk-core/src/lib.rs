// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core domain types and errors for the Fixdesk repair-shop backend.
//!
//! Defines the records shared across crates (clients, devices, messages and
//! their joined views), the status vocabularies applied at the API and
//! webhook boundaries, and the workspace-wide [`FixdeskError`] type.

pub mod error;
pub mod types;

pub use error::FixdeskError;
pub use types::{
    Client, ConversationMessage, Device, DeviceStatus, DeviceWithClient, Message,
    MessageDirection, MessageStatus, UNKNOWN_CLIENT_NAME,
};
