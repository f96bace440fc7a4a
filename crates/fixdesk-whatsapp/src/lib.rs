// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WhatsApp Cloud API adapter for the Fixdesk repair-shop backend.
//!
//! Two halves: [`WhatsAppClient`] sends outbound text/template messages via
//! the Cloud API's `/{phone_number_id}/messages` endpoint, and [`webhook`]
//! holds the serde types for inbound event payloads plus the provider
//! status vocabulary remap.
//!
//! Send failures are values ([`SendOutcome`]), never errors: a failed or
//! skipped notification must not abort the operation that triggered it.

pub mod client;
pub mod webhook;

pub use client::{SendOutcome, WhatsAppClient};
