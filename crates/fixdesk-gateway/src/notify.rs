// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification composer for device lifecycle events.
//!
//! Composes a fixed-template status message for a device, sends it via the
//! Cloud API client, and records the outbound message when the provider
//! returns an id. Failures and skips are logged and absorbed -- the
//! device-create/status-update operation that triggered the notification
//! always proceeds.

use fixdesk_core::{DeviceStatus, DeviceWithClient, Message, MessageDirection, MessageStatus};
use fixdesk_storage::{Database, now_timestamp, queries};
use fixdesk_whatsapp::{SendOutcome, WhatsAppClient};
use tracing::{debug, error, warn};

/// Greeting sent when a device is taken in.
pub fn device_received_message(device: &DeviceWithClient) -> String {
    format!(
        "Hello {}! We have successfully received your device \"{}\".",
        device.client.name, device.name
    )
}

/// Status-update message, keyed by the four lifecycle statuses.
///
/// A stored status outside the known set falls back to a generic
/// "status is now" line -- never an error.
pub fn status_update_message(device: &DeviceWithClient) -> String {
    let client = &device.client.name;
    let name = &device.name;
    match device.status.parse::<DeviceStatus>() {
        Ok(DeviceStatus::Received) => format!(
            "Hello {client}, we have received your device \"{name}\" and will start on it shortly."
        ),
        Ok(DeviceStatus::Working) => {
            format!("Hello {client}, we are now working on your device \"{name}\".")
        }
        Ok(DeviceStatus::Done) => {
            format!("Hello {client}, your device \"{name}\" is repaired and ready for pickup.")
        }
        Ok(DeviceStatus::Delivered) => format!(
            "Hello {client}, your device \"{name}\" has been delivered. Thank you for choosing us!"
        ),
        Err(_) => format!(
            "Hello {client}, your device \"{name}\" status is now: {}.",
            device.status
        ),
    }
}

/// Notify the owning client that their device was taken in.
pub async fn send_device_received(db: &Database, whatsapp: &WhatsAppClient, device: &DeviceWithClient) {
    send_and_record(db, whatsapp, device, device_received_message(device)).await;
}

/// Notify the owning client of a device status change.
pub async fn send_status_update(db: &Database, whatsapp: &WhatsAppClient, device: &DeviceWithClient) {
    send_and_record(db, whatsapp, device, status_update_message(device)).await;
}

async fn send_and_record(
    db: &Database,
    whatsapp: &WhatsAppClient,
    device: &DeviceWithClient,
    body: String,
) {
    match whatsapp.send_text(&device.client.phone, &body).await {
        SendOutcome::Sent {
            message_id: Some(wa_message_id),
            ..
        } => {
            let message = Message {
                id: uuid::Uuid::new_v4().to_string(),
                client_id: device.client.id.clone(),
                device_id: Some(device.id.clone()),
                content: body,
                direction: MessageDirection::Outbound.to_string(),
                status: MessageStatus::Sent.to_string(),
                wa_message_id,
                created_at: now_timestamp(),
            };
            if let Err(e) = queries::messages::insert_message(db, &message).await {
                error!(device_id = %device.id, error = %e, "failed to record notification");
            } else {
                debug!(device_id = %device.id, "notification sent and recorded");
            }
        }
        SendOutcome::Sent {
            message_id: None, ..
        } => {
            warn!(device_id = %device.id, "provider returned no message id; notification not recorded");
        }
        SendOutcome::Skipped => {
            debug!(device_id = %device.id, "notification skipped (messaging disabled)");
        }
        SendOutcome::Failed { error, .. } => {
            warn!(device_id = %device.id, error = %error, "notification send failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixdesk_core::Client;

    fn device_with_status(status: &str) -> DeviceWithClient {
        DeviceWithClient {
            id: "d1".into(),
            name: "iPhone 12".into(),
            status: status.into(),
            client_id: "c1".into(),
            created_at: "2026-01-01T00:00:00.000Z".into(),
            client: Client {
                id: "c1".into(),
                name: "Jane".into(),
                phone: "201234567890".into(),
                created_at: "2026-01-01T00:00:00.000Z".into(),
            },
        }
    }

    #[test]
    fn received_greeting_names_client_and_device() {
        let msg = device_received_message(&device_with_status("RECEIVED"));
        assert_eq!(
            msg,
            "Hello Jane! We have successfully received your device \"iPhone 12\"."
        );
    }

    #[test]
    fn each_lifecycle_status_has_its_own_template() {
        let templates: Vec<String> = ["RECEIVED", "WORKING", "DONE", "DELIVERED"]
            .iter()
            .map(|s| status_update_message(&device_with_status(s)))
            .collect();
        for template in &templates {
            assert!(template.contains("Jane"));
            assert!(template.contains("iPhone 12"));
        }
        // All four read differently.
        for (i, a) in templates.iter().enumerate() {
            for b in templates.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unrecognized_status_falls_back_to_generic_line() {
        let msg = status_update_message(&device_with_status("ARCHIVED"));
        assert_eq!(
            msg,
            "Hello Jane, your device \"iPhone 12\" status is now: ARCHIVED."
        );
    }
}
