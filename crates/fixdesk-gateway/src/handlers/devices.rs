// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Device routes: list, intake, status update.
//!
//! Intake find-or-creates the owning client and fires the "device received"
//! notification; status updates validate against the four-value lifecycle
//! set and fire the status notification. Notification failures never fail
//! the request.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fixdesk_core::DeviceStatus;
use fixdesk_storage::queries;
use serde::Deserialize;
use tracing::error;

use super::{ErrorResponse, bad_request, internal_error};
use crate::{GatewayState, notify};

/// Request body for POST /api/devices.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDeviceRequest {
    /// Display name of the device being taken in.
    pub name: String,
    /// Owning client's display name (used only when the client is new).
    pub client_name: String,
    /// Owning client's phone number.
    pub client_phone: String,
}

/// Request body for PATCH /api/devices/{id}/status.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// GET /api/devices
pub async fn get_devices(State(state): State<GatewayState>) -> Response {
    match queries::devices::list_devices(&state.db).await {
        Ok(devices) => (StatusCode::OK, Json(devices)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to list devices");
            internal_error("Failed to fetch devices")
        }
    }
}

/// POST /api/devices
///
/// Takes in a device: find-or-creates the client by phone, creates the
/// device in RECEIVED, and notifies the client.
pub async fn add_device(
    State(state): State<GatewayState>,
    Json(body): Json<AddDeviceRequest>,
) -> Response {
    let client =
        match queries::clients::find_or_create_client(&state.db, &body.client_name, &body.client_phone)
            .await
        {
            Ok(client) => client,
            Err(e) => {
                error!(error = %e, "failed to find or create client");
                return internal_error("Failed to add device");
            }
        };

    let device = match queries::devices::create_device(&state.db, &body.name, &client.id).await {
        Ok(device) => device,
        Err(e) => {
            error!(error = %e, "failed to create device");
            return internal_error("Failed to add device");
        }
    };

    notify::send_device_received(&state.db, &state.whatsapp, &device).await;

    (StatusCode::OK, Json(device)).into_response()
}

/// PATCH /api/devices/{id}/status
pub async fn update_status(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Response {
    let Ok(status) = body.status.parse::<DeviceStatus>() else {
        return bad_request("Invalid status");
    };

    match queries::devices::update_device_status(&state.db, &id, status).await {
        Ok(Some(device)) => {
            notify::send_status_update(&state.db, &state.whatsapp, &device).await;
            (StatusCode::OK, Json(device)).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Device not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!(device_id = %id, error = %e, "failed to update device status");
            internal_error("Failed to update device status")
        }
    }
}
