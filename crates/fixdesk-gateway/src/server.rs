// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, patch, post},
};
use fixdesk_core::FixdeskError;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::GatewayState;
use crate::handlers::{devices, messages, webhook};

/// Gateway server configuration (mirrors `ServerConfig` from fixdesk-config
/// to avoid a dependency on the config crate from the gateway crate).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Origin allowed to call the API cross-origin (the staff dashboard).
    pub cors_allowed_origin: String,
}

/// Build the gateway router.
///
/// Routes:
/// - GET  /api/devices, POST /api/devices, PATCH /api/devices/{id}/status
/// - POST /api/messages/send, GET /api/messages/conversations,
///   GET  /api/messages/conversation/{client_id}
/// - GET/POST /webhook/whatsapp
pub fn router(state: GatewayState, cors_allowed_origin: &str) -> Result<Router, FixdeskError> {
    let origin = cors_allowed_origin
        .parse::<HeaderValue>()
        .map_err(|e| FixdeskError::Config(format!(
            "invalid server.cors_allowed_origin `{cors_allowed_origin}`: {e}"
        )))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route(
            "/api/devices",
            get(devices::get_devices).post(devices::add_device),
        )
        .route("/api/devices/{id}/status", patch(devices::update_status))
        .route("/api/messages/send", post(messages::send_message))
        .route(
            "/api/messages/conversations",
            get(messages::get_all_conversations),
        )
        .route(
            "/api/messages/conversation/{client_id}",
            get(messages::get_conversation),
        );

    // Webhook routes are provider-facing; CORS only matters for the
    // browser-based dashboard but the layer is harmless here.
    let webhook_routes = Router::new().route(
        "/webhook/whatsapp",
        get(webhook::verify_webhook).post(webhook::handle_webhook),
    );

    Ok(Router::new()
        .merge(api_routes)
        .merge(webhook_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the gateway HTTP server and serve until the process exits.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), FixdeskError> {
    let app = router(state, &config.cors_allowed_origin)?;

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| FixdeskError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| FixdeskError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
