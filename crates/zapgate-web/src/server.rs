// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local observability HTTP server built on axum.
//!
//! Serves the status page, the QR artifact, and the structured status
//! endpoints to local observers (operators, the dashboard poller). The
//! server only reads the status watch channel; it has no path that mutates
//! connection state.

use axum::Router;
use axum::routing::get;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use zapgate_config::model::WebConfig;
use zapgate_core::{StatusSnapshot, ZapgateError};

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct WebState {
    /// Live view of the current status snapshot.
    pub status: watch::Receiver<StatusSnapshot>,
}

/// Builds the observability router.
pub fn router(state: WebState) -> Router {
    Router::new()
        .route("/", get(handlers::get_index))
        .route("/qr", get(handlers::get_qr))
        .route("/qr-data", get(handlers::get_qr_data))
        .route("/status", get(handlers::get_status))
        .with_state(state)
        // The dashboard poller runs on another origin.
        .layer(CorsLayer::permissive())
}

/// Binds and serves the observability endpoint until cancellation.
pub async fn start_server(
    config: &WebConfig,
    state: WebState,
    cancel: CancellationToken,
) -> Result<(), ZapgateError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener =
        tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| ZapgateError::Internal(format!(
                "failed to bind status endpoint to {addr}: {e}"
            )))?;

    tracing::info!("local status endpoint listening on {addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| ZapgateError::Internal(format!("status endpoint error: {e}")))?;

    Ok(())
}
