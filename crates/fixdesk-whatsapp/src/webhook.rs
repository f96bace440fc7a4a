// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound webhook payload types and the provider status remap.
//!
//! The Cloud API delivers events as `entry[] -> changes[] -> value`, where
//! a value carries inbound `messages[]` and/or delivery `statuses[]`.
//! Every field defaults so partial payloads deserialize instead of failing
//! the whole event.

use fixdesk_core::MessageStatus;
use serde::Deserialize;

/// The `object` value identifying a WhatsApp Business event payload.
pub const EVENT_OBJECT: &str = "whatsapp_business_account";

/// Content type of a plain text inbound message.
pub const TEXT_MESSAGE_KIND: &str = "text";

/// Top-level webhook event payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub entry: Vec<Entry>,
}

impl WebhookPayload {
    /// True when this payload is a WhatsApp Business event at all.
    pub fn is_whatsapp_event(&self) -> bool {
        self.object == EVENT_OBJECT
    }
}

/// One account-level entry in an event payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub changes: Vec<Change>,
}

/// A single change notification inside an entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub value: ChangeValue,
}

/// The payload of a `messages`-field change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub messages: Vec<InboundMessage>,
    #[serde(default)]
    pub statuses: Vec<StatusEvent>,
}

/// An inbound message from a customer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundMessage {
    /// Sender phone number.
    #[serde(default)]
    pub from: String,
    /// The provider's message id -- stored as the correlation id.
    #[serde(default)]
    pub id: String,
    /// Content type: "text", "image", "audio", ...
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<TextBody>,
}

impl InboundMessage {
    /// True for plain text messages, the only content type handled.
    pub fn is_text(&self) -> bool {
        self.kind == TEXT_MESSAGE_KIND
    }

    /// The text body, when present.
    pub fn body(&self) -> Option<&str> {
        self.text.as_ref().map(|t| t.body.as_str())
    }
}

/// Body of a text message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextBody {
    #[serde(default)]
    pub body: String,
}

/// An asynchronous delivery-status callback for a previously sent message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusEvent {
    /// The provider message id the status refers to.
    #[serde(default)]
    pub id: String,
    /// Provider status vocabulary: sent, delivered, read, failed.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub recipient_id: Option<String>,
}

/// Map the provider's status vocabulary onto the internal message status.
///
/// Unrecognized provider statuses map to `None` and are dropped by the
/// caller -- a deliberate no-op, not an error.
pub fn map_provider_status(status: &str) -> Option<MessageStatus> {
    match status {
        "sent" => Some(MessageStatus::Sent),
        "delivered" => Some(MessageStatus::Delivered),
        "read" => Some(MessageStatus::Read),
        "failed" => Some(MessageStatus::Failed),
        _ => None,
    }
}
