// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `fixdesk-core::types` for use across
//! crate boundaries. This module re-exports them for convenience within the
//! storage crate.

pub use fixdesk_core::types::{
    Client, ConversationMessage, Device, DeviceStatus, DeviceWithClient, Message, MessageDirection,
    MessageStatus,
};
