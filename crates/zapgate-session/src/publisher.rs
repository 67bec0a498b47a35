// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic status resend to the operations backend.
//!
//! The lifecycle manager pushes event-driven snapshots inline on every
//! phase change; this task re-sends the current snapshot on a fixed
//! interval, so the backend converges to local truth within one interval
//! even when an event-driven push was lost. No retries, no acks.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use zapgate_core::{ReasoningBackend, StatusSnapshot};

/// Timer-driven snapshot publisher.
pub struct StatusPublisher {
    backend: Arc<dyn ReasoningBackend>,
    status_rx: watch::Receiver<StatusSnapshot>,
    interval: Duration,
}

impl StatusPublisher {
    pub fn new(
        backend: Arc<dyn ReasoningBackend>,
        status_rx: watch::Receiver<StatusSnapshot>,
        interval: Duration,
    ) -> Self {
        Self {
            backend,
            status_rx,
            interval,
        }
    }

    /// Runs until cancelled, pushing the current snapshot every interval.
    pub async fn run(self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);
        // Skip the immediate first tick; the manager already pushed the
        // initial state transition.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let snapshot = self.status_rx.borrow().clone();
                    if let Err(e) = self.backend.push_status(&snapshot).await {
                        warn!(error = %e, "periodic status push failed");
                    }
                }
                _ = cancel.cancelled() => {
                    debug!("status publisher shutting down");
                    break;
                }
            }
        }
    }
}
