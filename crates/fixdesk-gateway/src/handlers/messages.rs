// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message routes: ad-hoc send, conversation history, conversation list.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use super::{bad_request, internal_error};
use crate::GatewayState;
use crate::tracking::{self, DEFAULT_CONVERSATION_LIMIT, TrackingError};

/// Request body for POST /api/messages/send.
///
/// Fields default so presence is checked by the handler (400, not a serde
/// rejection) -- the dashboard relies on the descriptive message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub client_phone: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
}

/// Response body for POST /api/messages/send.
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub message: String,
    /// Raw provider response data.
    pub data: Value,
}

/// Query parameters for GET /api/messages/conversation/{client_id}.
#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}

/// POST /api/messages/send
pub async fn send_message(
    State(state): State<GatewayState>,
    Json(body): Json<SendMessageRequest>,
) -> Response {
    let phone = body.client_phone.as_deref().unwrap_or("").trim();
    let content = body.content.as_deref().unwrap_or("").trim();
    if phone.is_empty() || content.is_empty() {
        return bad_request("clientPhone and content are required");
    }

    match tracking::send_and_track(&state.db, &state.whatsapp, phone, content, body.device_id).await
    {
        Ok(tracked) => (
            StatusCode::OK,
            Json(SendMessageResponse {
                success: true,
                message: "Message sent successfully".to_string(),
                data: tracked.data,
            }),
        )
            .into_response(),
        Err(TrackingError::Storage(e)) => {
            error!(error = %e, "failed to send message");
            internal_error("Failed to send message")
        }
        Err(domain) => bad_request(domain.to_string()),
    }
}

/// GET /api/messages/conversation/{client_id}?limit=
pub async fn get_conversation(
    State(state): State<GatewayState>,
    Path(client_id): Path<String>,
    Query(query): Query<ConversationQuery>,
) -> Response {
    let limit = query.limit.unwrap_or(DEFAULT_CONVERSATION_LIMIT);
    match tracking::get_conversation(&state.db, &client_id, limit).await {
        Ok(messages) => (StatusCode::OK, Json(messages)).into_response(),
        Err(e) => {
            error!(client_id = %client_id, error = %e, "failed to fetch conversation");
            internal_error("Failed to fetch conversation")
        }
    }
}

/// GET /api/messages/conversations
pub async fn get_all_conversations(State(state): State<GatewayState>) -> Response {
    match tracking::get_all_conversations(&state.db).await {
        Ok(conversations) => (StatusCode::OK, Json(conversations)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to fetch conversations");
            internal_error("Failed to fetch conversations")
        }
    }
}
