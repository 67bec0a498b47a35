// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection lifecycle state machine and reconnection supervisor.
//!
//! One [`LifecycleManager`] owns the connection state, the dedup cache (via
//! the relay pipeline), and the credential store. It runs as a single task:
//! a supervisor loop opens a transport session, consumes its events to the
//! close, then applies the reconnection policy:
//!
//! 1. Explicit logout: purge credentials, halt; a human must re-pair.
//! 2. Invalid session (including auth rejection): purge credentials, wait
//!    the short cooldown, restart from scratch.
//! 3. Anything else: wait the generic cooldown, restart reusing the
//!    persisted credentials.
//!
//! Retries are unbounded with fixed delays: a business-hours bot is
//! expected to recover unattended. The cost is that a persistently broken
//! network is retried forever without backoff growth.
//!
//! In-flight relay tasks are never aborted by a reconnect; a reply may be
//! attempted against a closed session and simply fail.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use zapgate_config::model::TransportConfig;
use zapgate_core::{
    CredentialStore, DisconnectCause, ReasoningBackend, StatusSnapshot, TransportConnection,
    TransportDriver, TransportEvent,
};

use crate::relay::RelayPipeline;
use crate::state::ConnectionState;

/// What to do after a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconnectDecision {
    /// No automatic reconnection; manual re-authentication required.
    Halt,
    /// Purge persisted credentials, then retry after the cooldown.
    PurgeAndRetry(Duration),
    /// Retry after the cooldown, reusing persisted credentials.
    Retry(Duration),
}

/// Maps a close cause to the reconnection policy, in priority order.
pub fn decide(cause: &DisconnectCause, config: &TransportConfig) -> ReconnectDecision {
    match cause {
        DisconnectCause::LoggedOut => ReconnectDecision::Halt,
        DisconnectCause::BadSession => {
            ReconnectDecision::PurgeAndRetry(Duration::from_secs(config.bad_session_delay_secs))
        }
        DisconnectCause::Other(_) => {
            ReconnectDecision::Retry(Duration::from_secs(config.reconnect_delay_secs))
        }
    }
}

/// Owns the transport session lifecycle and drives the relay pipeline.
pub struct LifecycleManager {
    driver: Arc<dyn TransportDriver>,
    backend: Arc<dyn ReasoningBackend>,
    store: Arc<dyn CredentialStore>,
    state: ConnectionState,
    relay: RelayPipeline,
    status_tx: tokio::sync::watch::Sender<StatusSnapshot>,
    config: TransportConfig,
}

impl LifecycleManager {
    pub fn new(
        driver: Arc<dyn TransportDriver>,
        backend: Arc<dyn ReasoningBackend>,
        store: Arc<dyn CredentialStore>,
        relay: RelayPipeline,
        status_tx: tokio::sync::watch::Sender<StatusSnapshot>,
        config: TransportConfig,
    ) -> Self {
        Self {
            driver,
            backend,
            store,
            state: ConnectionState::new(),
            relay,
            status_tx,
            config,
        }
    }

    /// Runs the supervisor loop until cancellation or explicit logout.
    ///
    /// Returns normally in both cases; after a logout the caller keeps the
    /// observability surfaces alive so operators can see the
    /// "Logged out" status and restart the pairing.
    pub async fn run(mut self, cancel: CancellationToken) {
        loop {
            if cancel.is_cancelled() {
                break;
            }

            let credentials = match self.store.load_all().await {
                Ok(credentials) => credentials,
                Err(e) => {
                    warn!(error = %e, "failed to load credentials, pairing fresh");
                    Vec::new()
                }
            };

            let connection = match self.driver.connect(credentials).await {
                Ok(connection) => connection,
                Err(e) => {
                    warn!(error = %e, "transport connect failed");
                    self.state.reconnecting();
                    self.publish().await;
                    let delay = Duration::from_secs(self.config.reconnect_delay_secs);
                    if !self.cooldown(delay, &cancel).await {
                        break;
                    }
                    self.state.awaiting_qr();
                    self.publish().await;
                    continue;
                }
            };

            info!("transport session opened, consuming events");

            let decision = self.drive_session(connection, &cancel).await;
            match decision {
                None => break, // cancelled mid-session
                Some(ReconnectDecision::Halt) => {
                    if let Err(e) = self.store.delete_all().await {
                        warn!(error = %e, "failed to purge credentials after logout");
                    }
                    self.state.logged_out();
                    self.publish().await;
                    info!("logged out by remote device, halting until re-pairing");
                    break;
                }
                Some(ReconnectDecision::PurgeAndRetry(delay)) => {
                    if let Err(e) = self.store.delete_all().await {
                        warn!(error = %e, "failed to purge invalid session credentials");
                    }
                    self.state.reconnecting();
                    self.publish().await;
                    if !self.cooldown(delay, &cancel).await {
                        break;
                    }
                    self.state.awaiting_qr();
                    self.publish().await;
                }
                Some(ReconnectDecision::Retry(delay)) => {
                    self.state.reconnecting();
                    self.publish().await;
                    if !self.cooldown(delay, &cancel).await {
                        break;
                    }
                    self.state.awaiting_qr();
                    self.publish().await;
                }
            }
        }

        debug!("lifecycle manager stopped");
    }

    /// Consumes events from one session until it closes.
    ///
    /// Returns `None` when cancelled, otherwise the reconnect decision for
    /// the close cause.
    async fn drive_session(
        &mut self,
        mut connection: TransportConnection,
        cancel: &CancellationToken,
    ) -> Option<ReconnectDecision> {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    let _ = connection.handle.close().await;
                    return None;
                }
                event = connection.events.recv() => {
                    let Some(event) = event else {
                        // The driver went away without a close frame.
                        warn!("transport event stream ended without close");
                        let cause = DisconnectCause::Other(None);
                        self.on_closed().await;
                        return Some(decide(&cause, &self.config));
                    };

                    match event {
                        TransportEvent::QrIssued { challenge } => {
                            info!("login challenge issued, scan to authenticate");
                            self.state.qr_issued(challenge);
                            self.publish().await;
                        }
                        TransportEvent::SessionOpen { identity } => {
                            info!(identity = identity.as_str(), "session established");
                            self.state.session_opened(identity);
                            self.publish().await;
                        }
                        TransportEvent::CredentialsRotated(blob) => {
                            // Persisted on every rotation, independent of phase.
                            if let Err(e) = self.store.save(&blob).await {
                                warn!(
                                    blob = blob.name.as_str(),
                                    error = %e,
                                    "failed to persist rotated credentials"
                                );
                            }
                        }
                        TransportEvent::Message(msg) => {
                            self.relay.dispatch(msg, connection.handle.clone());
                        }
                        TransportEvent::SessionClosed { cause } => {
                            warn!(cause = ?cause, "transport session closed");
                            self.on_closed().await;
                            return Some(decide(&cause, &self.config));
                        }
                    }
                }
            }
        }
    }

    /// Close handling that must happen before any cooldown: drop challenge
    /// and identity with the phase, and push the disconnected snapshot.
    async fn on_closed(&mut self) {
        self.state.closing();
        self.publish().await;
    }

    /// Publishes the current snapshot: updates the watch channel for local
    /// observers and pushes to the backend. Best-effort; failures are
    /// logged and the periodic publisher resends the truth.
    async fn publish(&self) {
        let snapshot = self.state.snapshot();
        self.status_tx.send_replace(snapshot.clone());
        if let Err(e) = self.backend.push_status(&snapshot).await {
            warn!(error = %e, "status push failed");
        }
    }

    /// Waits out a reconnect cooldown. Returns `false` when cancelled.
    async fn cooldown(&self, delay: Duration, cancel: &CancellationToken) -> bool {
        info!(delay_secs = delay.as_secs(), "reconnecting after cooldown");
        tokio::select! {
            _ = tokio::time::sleep(delay) => true,
            _ = cancel.cancelled() => false,
        }
    }
}
