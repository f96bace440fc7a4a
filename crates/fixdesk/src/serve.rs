// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `fixdesk serve` command implementation.
//!
//! Wires the collaborators together in dependency order -- SQLite storage,
//! the WhatsApp client (disabled when credentials are missing), the gateway
//! state -- and runs the HTTP server until a shutdown signal arrives.

use std::sync::Arc;

use fixdesk_config::FixdeskConfig;
use fixdesk_core::FixdeskError;
use fixdesk_gateway::GatewayState;
use fixdesk_gateway::server::{ServerConfig, start_server};
use fixdesk_storage::Database;
use fixdesk_whatsapp::WhatsAppClient;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Runs the `fixdesk serve` command.
pub async fn run_serve(config: FixdeskConfig) -> Result<(), FixdeskError> {
    init_tracing(&config.server.log_level);

    info!("starting fixdesk serve");

    // Ensure the data directory exists before SQLite tries to open a file
    // inside it (the default path lives under the XDG data dir).
    if let Some(parent) = std::path::Path::new(&config.storage.database_path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| FixdeskError::Storage {
            source: Box::new(e),
        })?;
    }

    let db = Arc::new(
        Database::open(&config.storage.database_path, config.storage.wal_mode).await?,
    );
    info!(path = %config.storage.database_path, "storage initialized");

    // Missing credentials log a one-shot warning inside new() and leave the
    // client disabled; the server still starts.
    let whatsapp = Arc::new(WhatsAppClient::new(&config.whatsapp)?);
    if whatsapp.is_enabled() {
        info!("WhatsApp messaging enabled");
    }

    let state = GatewayState {
        db: Arc::clone(&db),
        whatsapp,
        verify_token: config.whatsapp.verify_token.clone(),
    };
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        cors_allowed_origin: config.server.cors_allowed_origin.clone(),
    };

    tokio::select! {
        result = start_server(&server_config, state) => result?,
        _ = shutdown_signal() => {
            info!("shutdown signal received");
        }
    }

    db.close().await?;
    info!("fixdesk stopped");
    Ok(())
}

/// Initialize the tracing subscriber from the configured log level, with
/// `RUST_LOG` taking precedence when set.
fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.to_string()));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        // Fall through: without a signal handler the select! would return
        // immediately, so park this branch forever instead.
        std::future::pending::<()>().await;
    }
}
