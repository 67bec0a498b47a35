// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `zapgate serve` command implementation.
//!
//! Wires the credential store, backend client, transport driver, lifecycle
//! manager, status publisher, and local observability endpoint, then runs
//! the manager until explicit logout or a shutdown signal. After a logout
//! the observability surfaces stay up so operators can see the state and
//! restart the pairing.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info};
use zapgate_backend::BackendClient;
use zapgate_config::ZapgateConfig;
use zapgate_core::{StatusSnapshot, ZapgateError};
use zapgate_session::{
    FsCredentialStore, LifecycleManager, RelayPipeline, StatusPublisher, shutdown,
};
use zapgate_transport::WsTransport;
use zapgate_web::{WebState, start_server};

/// Runs the `zapgate serve` command.
pub async fn run_serve(config: ZapgateConfig) -> Result<(), ZapgateError> {
    init_tracing(&config.agent.log_level);

    info!(name = config.agent.name.as_str(), "starting zapgate serve");

    let store = Arc::new(FsCredentialStore::new(&config.transport.auth_dir));
    let backend = Arc::new(BackendClient::new(&config.backend)?);
    let driver = Arc::new(WsTransport::new(config.transport.clone()));
    let (status_tx, status_rx) = watch::channel(StatusSnapshot::default());

    let cancel = shutdown::install_signal_handler();

    // Local observability endpoint.
    let web_state = WebState {
        status: status_rx.clone(),
    };
    let web_config = config.web.clone();
    let web_cancel = cancel.clone();
    let web_task = tokio::spawn(async move {
        if let Err(e) = start_server(&web_config, web_state, web_cancel).await {
            error!(error = %e, "local status endpoint failed");
        }
    });

    // Periodic status resend to the backend.
    let publisher = StatusPublisher::new(
        backend.clone(),
        status_rx,
        Duration::from_secs(config.backend.status_interval_secs),
    );
    let publisher_task = tokio::spawn(publisher.run(cancel.clone()));

    // The lifecycle manager: single owner of connection state and dedup.
    let relay = RelayPipeline::new(backend.clone(), &config.relay);
    let manager = LifecycleManager::new(
        driver,
        backend,
        store,
        relay,
        status_tx,
        config.transport.clone(),
    );
    manager.run(cancel.clone()).await;

    // The manager halts on logout; keep serving status until a signal.
    cancel.cancelled().await;

    let _ = publisher_task.await;
    let _ = web_task.await;

    info!("zapgate serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("zapgate={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
