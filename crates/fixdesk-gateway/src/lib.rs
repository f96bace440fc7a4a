// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Fixdesk repair-shop backend.
//!
//! Exposes the dashboard-facing REST API (devices, messages) and the
//! provider-facing webhook endpoints on one axum server, and hosts the two
//! services sitting between them and the collaborators:
//!
//! - [`notify`] -- composes device lifecycle notifications and records the
//!   outbound messages it manages to send.
//! - [`tracking`] -- sends ad-hoc messages to known clients and serves
//!   conversation history and summaries.
//!
//! Control flow: dashboard -> handlers -> {notify, tracking} ->
//! {storage, WhatsApp client}; provider -> webhook handler -> storage.

pub mod handlers;
pub mod notify;
pub mod server;
pub mod tracking;

use std::sync::Arc;

use fixdesk_storage::Database;
use fixdesk_whatsapp::WhatsAppClient;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Handle to the SQLite store.
    pub db: Arc<Database>,
    /// Cloud API client (may be disabled when credentials are missing).
    pub whatsapp: Arc<WhatsAppClient>,
    /// Shared secret for the webhook verification handshake.
    pub verify_token: Option<String>,
}
