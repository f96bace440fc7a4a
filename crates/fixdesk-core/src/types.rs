// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain records and status vocabularies shared across the workspace.
//!
//! Status and direction columns are stored as TEXT; the enums here define
//! the accepted vocabulary and are applied at the boundaries (request
//! validation, webhook status remapping). JSON wire format is camelCase --
//! the contract the dashboard consumes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Placeholder name for clients created from an inbound message whose
/// sender has never been seen before.
pub const UNKNOWN_CLIENT_NAME: &str = "Unknown Client";

/// Lifecycle status of a device under repair.
///
/// No transition order is enforced -- any value in the set is accepted on
/// update.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceStatus {
    Received,
    Working,
    Done,
    Delivered,
}

/// Direction of a message relative to the shop.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageDirection {
    Inbound,
    Outbound,
}

/// Delivery status of a message, mutated asynchronously by provider
/// status callbacks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStatus {
    Pending,
    Sent,
    Delivered,
    Read,
    Failed,
}

/// A customer record keyed by phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    /// Unique; used as the external correlation key for inbound messages.
    pub phone: String,
    pub created_at: String,
}

/// An intake item undergoing repair, owned by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    pub status: String,
    pub client_id: String,
    pub created_at: String,
}

/// A device with its owning client resolved, as returned by the API and
/// consumed by the notification composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceWithClient {
    pub id: String,
    pub name: String,
    pub status: String,
    pub client_id: String,
    pub created_at: String,
    pub client: Client,
}

/// A single directional record of a text exchange with a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub client_id: String,
    pub device_id: Option<String>,
    pub content: String,
    pub direction: String,
    pub status: String,
    /// The provider's message id. Once assigned, the sole join key for
    /// asynchronous delivery-status callbacks.
    pub wa_message_id: String,
    pub created_at: String,
}

/// A message with its client and (optional) device cross-references
/// populated, as returned by the conversation endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMessage {
    #[serde(flatten)]
    pub message: Message,
    pub client: Client,
    pub device: Option<Device>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn device_status_round_trips_through_strings() {
        for (status, text) in [
            (DeviceStatus::Received, "RECEIVED"),
            (DeviceStatus::Working, "WORKING"),
            (DeviceStatus::Done, "DONE"),
            (DeviceStatus::Delivered, "DELIVERED"),
        ] {
            assert_eq!(status.to_string(), text);
            assert_eq!(DeviceStatus::from_str(text).unwrap(), status);
        }
    }

    #[test]
    fn device_status_rejects_unknown_values() {
        assert!(DeviceStatus::from_str("BROKEN").is_err());
        assert!(DeviceStatus::from_str("received").is_err());
        assert!(DeviceStatus::from_str("").is_err());
    }

    #[test]
    fn message_status_covers_provider_vocabulary() {
        assert_eq!(MessageStatus::Sent.to_string(), "SENT");
        assert_eq!(MessageStatus::Delivered.to_string(), "DELIVERED");
        assert_eq!(MessageStatus::Read.to_string(), "READ");
        assert_eq!(MessageStatus::Failed.to_string(), "FAILED");
        assert_eq!(MessageStatus::Pending.to_string(), "PENDING");
    }

    #[test]
    fn records_serialize_as_camel_case() {
        let client = Client {
            id: "c1".into(),
            name: "Jane".into(),
            phone: "201234567890".into(),
            created_at: "2026-01-01T00:00:00.000Z".into(),
        };
        let json = serde_json::to_value(&client).unwrap();
        assert_eq!(json["createdAt"], "2026-01-01T00:00:00.000Z");

        let msg = Message {
            id: "m1".into(),
            client_id: "c1".into(),
            device_id: Some("d1".into()),
            content: "hello".into(),
            direction: MessageDirection::Outbound.to_string(),
            status: MessageStatus::Sent.to_string(),
            wa_message_id: "wamid.1".into(),
            created_at: "2026-01-01T00:00:01.000Z".into(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["clientId"], "c1");
        assert_eq!(json["deviceId"], "d1");
        assert_eq!(json["waMessageId"], "wamid.1");
        assert_eq!(json["direction"], "OUTBOUND");
    }

    #[test]
    fn conversation_message_flattens_message_fields() {
        let client = Client {
            id: "c1".into(),
            name: "Jane".into(),
            phone: "201234567890".into(),
            created_at: "2026-01-01T00:00:00.000Z".into(),
        };
        let entry = ConversationMessage {
            message: Message {
                id: "m1".into(),
                client_id: "c1".into(),
                device_id: None,
                content: "hi".into(),
                direction: MessageDirection::Inbound.to_string(),
                status: MessageStatus::Delivered.to_string(),
                wa_message_id: "wamid.2".into(),
                created_at: "2026-01-01T00:00:02.000Z".into(),
            },
            client,
            device: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "m1");
        assert_eq!(json["client"]["name"], "Jane");
        assert!(json["device"].is_null());
    }
}
