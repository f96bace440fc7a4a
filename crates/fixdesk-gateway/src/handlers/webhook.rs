// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook ingestion: the provider verification handshake and event
//! delivery.
//!
//! Event delivery always answers 200 -- the provider retries on anything
//! else, and processing failures must never cause a retry storm. The body
//! is read as raw bytes so even an unparseable payload acks cleanly; every
//! per-event error is caught, logged, and processing continues with the
//! next sub-event. No transactionality across sub-events.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fixdesk_core::{FixdeskError, Message, MessageDirection, MessageStatus, UNKNOWN_CLIENT_NAME};
use fixdesk_storage::{now_timestamp, queries};
use fixdesk_whatsapp::webhook::{
    InboundMessage, StatusEvent, WebhookPayload, map_provider_status,
};
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::GatewayState;

/// Query parameters of the Meta verification handshake.
#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode", default)]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token", default)]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge", default)]
    pub challenge: Option<String>,
}

/// GET /webhook/whatsapp
///
/// Echoes the challenge when the mode is `subscribe` and the shared secret
/// matches; 403 otherwise (including when no token is configured).
pub async fn verify_webhook(
    State(state): State<GatewayState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    let token_matches = match state.verify_token.as_deref() {
        Some(expected) => params.verify_token.as_deref() == Some(expected),
        None => false,
    };

    if params.mode.as_deref() == Some("subscribe") && token_matches {
        info!("webhook verified successfully");
        (StatusCode::OK, params.challenge.unwrap_or_default()).into_response()
    } else {
        warn!("webhook verification failed");
        StatusCode::FORBIDDEN.into_response()
    }
}

/// POST /webhook/whatsapp
pub async fn handle_webhook(State(state): State<GatewayState>, body: Bytes) -> StatusCode {
    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "unparseable webhook body, ignoring");
            return StatusCode::OK;
        }
    };

    if !payload.is_whatsapp_event() {
        debug!(object = %payload.object, "not a WhatsApp event, ignoring");
        return StatusCode::OK;
    }

    for entry in payload.entry {
        for change in entry.changes {
            if change.field != "messages" {
                continue;
            }
            for message in change.value.messages {
                if let Err(e) = process_incoming_message(&state, &message).await {
                    error!(wa_message_id = %message.id, error = %e, "error processing incoming message");
                }
            }
            for status in change.value.statuses {
                if let Err(e) = process_status_update(&state, &status).await {
                    error!(wa_message_id = %status.id, error = %e, "error processing status update");
                }
            }
        }
    }

    StatusCode::OK
}

/// Persist one inbound message, creating a placeholder client for a phone
/// number never seen before. Only text messages are handled.
async fn process_incoming_message(
    state: &GatewayState,
    message: &InboundMessage,
) -> Result<(), FixdeskError> {
    if !message.is_text() {
        debug!(kind = %message.kind, "received non-text message, skipping");
        return Ok(());
    }
    let Some(content) = message.body() else {
        return Ok(());
    };
    if content.is_empty() {
        return Ok(());
    }

    info!(from = %message.from, "incoming message");

    let client =
        queries::clients::find_or_create_client(&state.db, UNKNOWN_CLIENT_NAME, &message.from)
            .await?;

    let row = Message {
        id: uuid::Uuid::new_v4().to_string(),
        client_id: client.id.clone(),
        device_id: None,
        content: content.to_string(),
        direction: MessageDirection::Inbound.to_string(),
        status: MessageStatus::Delivered.to_string(),
        wa_message_id: message.id.clone(),
        created_at: now_timestamp(),
    };
    queries::messages::insert_message(&state.db, &row).await?;

    debug!(client = %client.name, "message saved");
    Ok(())
}

/// Apply one delivery-status callback. Unrecognized provider statuses and
/// unknown correlation ids are both silent no-ops.
async fn process_status_update(
    state: &GatewayState,
    status: &StatusEvent,
) -> Result<(), FixdeskError> {
    let Some(mapped) = map_provider_status(&status.status) else {
        debug!(status = %status.status, "unrecognized provider status, dropping");
        return Ok(());
    };

    let matched = queries::messages::update_message_status(&state.db, &status.id, mapped).await?;
    if matched {
        debug!(wa_message_id = %status.id, status = %mapped, "message status updated");
    } else {
        // Expected for outbound messages sent outside this system.
        debug!(wa_message_id = %status.id, "status update for unknown message, ignoring");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_params_deserialize_dotted_names() {
        let params: VerifyParams = serde_json::from_value(serde_json::json!({
            "hub.mode": "subscribe",
            "hub.verify_token": "secret",
            "hub.challenge": "12345"
        }))
        .unwrap();
        assert_eq!(params.mode.as_deref(), Some("subscribe"));
        assert_eq!(params.verify_token.as_deref(), Some("secret"));
        assert_eq!(params.challenge.as_deref(), Some("12345"));
    }

    #[test]
    fn verify_params_tolerate_missing_fields() {
        let params: VerifyParams =
            serde_json::from_value(serde_json::json!({"hub.mode": "subscribe"})).unwrap();
        assert_eq!(params.mode.as_deref(), Some("subscribe"));
        assert!(params.verify_token.is_none());
        assert!(params.challenge.is_none());
    }
}
