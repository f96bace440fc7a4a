// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message tracking service: ad-hoc sends to known clients plus
//! conversation reads.
//!
//! Sending requires a pre-provisioned client (created via device intake or
//! a prior inbound message); unknown phones are a domain error, not an
//! intake path. There is no retry.

use fixdesk_core::{ConversationMessage, FixdeskError, Message, MessageDirection, MessageStatus};
use fixdesk_storage::{Database, now_timestamp, queries};
use fixdesk_whatsapp::{SendOutcome, WhatsAppClient};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Default number of messages returned by conversation reads.
pub const DEFAULT_CONVERSATION_LIMIT: i64 = 50;

/// Why a tracked send did not go through.
///
/// Domain failures surface as 400 at the HTTP layer; storage failures stay
/// `FixdeskError` and degrade to a generic 500.
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("Client not found. Please add client first.")]
    ClientNotFound,
    #[error("{0}")]
    SendFailed(String),
    #[error(transparent)]
    Storage(#[from] FixdeskError),
}

/// Result of a successful tracked send.
#[derive(Debug)]
pub struct TrackedSend {
    /// The persisted outbound row; `None` when the provider accepted the
    /// message but returned no id to correlate on.
    pub message: Option<Message>,
    /// Raw provider response data.
    pub data: Value,
}

/// Send `content` to the client owning `phone` and persist the outbound
/// message on success.
pub async fn send_and_track(
    db: &Database,
    whatsapp: &WhatsAppClient,
    phone: &str,
    content: &str,
    device_id: Option<String>,
) -> Result<TrackedSend, TrackingError> {
    let client = queries::clients::find_client_by_phone(db, phone)
        .await?
        .ok_or(TrackingError::ClientNotFound)?;

    match whatsapp.send_text(phone, content).await {
        SendOutcome::Sent { message_id, data } => {
            let message = match message_id {
                Some(wa_message_id) => {
                    let message = Message {
                        id: uuid::Uuid::new_v4().to_string(),
                        client_id: client.id.clone(),
                        device_id,
                        content: content.to_string(),
                        direction: MessageDirection::Outbound.to_string(),
                        status: MessageStatus::Sent.to_string(),
                        wa_message_id,
                        created_at: now_timestamp(),
                    };
                    queries::messages::insert_message(db, &message).await?;
                    debug!(client = %client.name, "message tracked");
                    Some(message)
                }
                None => None,
            };
            Ok(TrackedSend { message, data })
        }
        SendOutcome::Skipped => Err(TrackingError::SendFailed(
            "WhatsApp credentials not configured; message not sent".to_string(),
        )),
        SendOutcome::Failed { error, .. } => Err(TrackingError::SendFailed(error)),
    }
}

/// Up to `limit` most-recent messages exchanged with a client, newest
/// first, with device/client cross-references populated.
pub async fn get_conversation(
    db: &Database,
    client_id: &str,
    limit: i64,
) -> Result<Vec<ConversationMessage>, FixdeskError> {
    queries::messages::find_messages_by_client(db, client_id, limit).await
}

/// One most-recent message per distinct client, newest first.
pub async fn get_all_conversations(db: &Database) -> Result<Vec<ConversationMessage>, FixdeskError> {
    queries::messages::find_all_conversations(db).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_not_found_reads_like_the_api_error() {
        assert_eq!(
            TrackingError::ClientNotFound.to_string(),
            "Client not found. Please add client first."
        );
    }

    #[test]
    fn send_failed_passes_reason_through() {
        let err = TrackingError::SendFailed("provider returned 400 Bad Request".into());
        assert_eq!(err.to_string(), "provider returned 400 Bad Request");
    }
}
