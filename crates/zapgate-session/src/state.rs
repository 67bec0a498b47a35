// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide connection state owned by the lifecycle manager.
//!
//! All mutation happens on the manager task; other components only see
//! [`StatusSnapshot`] projections.

use tracing::warn;
use zapgate_core::{ConnectionPhase, StatusSnapshot, qr};

/// The single connection-state instance.
///
/// Wraps [`ConnectionPhase`] with the transitions the lifecycle manager is
/// allowed to make. The phase carries the login challenge or the session
/// identity inside its variant, so stale artifacts cannot survive a
/// transition.
#[derive(Debug)]
pub struct ConnectionState {
    phase: ConnectionPhase,
}

impl ConnectionState {
    /// Creates the initial state: awaiting a login challenge.
    pub fn new() -> Self {
        Self {
            phase: ConnectionPhase::AwaitingQr,
        }
    }

    pub fn phase(&self) -> &ConnectionPhase {
        &self.phase
    }

    /// The transport issued a login challenge.
    pub fn qr_issued(&mut self, challenge: String) {
        self.phase = ConnectionPhase::QrIssued { challenge };
    }

    /// The transport reported an open session bound to `identity`.
    pub fn session_opened(&mut self, identity: String) {
        self.phase = ConnectionPhase::Connected { identity };
    }

    /// The transport reported a close; challenge and identity are dropped
    /// with the previous phase.
    pub fn closing(&mut self) {
        self.phase = ConnectionPhase::Closing;
    }

    /// Waiting out a cooldown before the next connection attempt.
    pub fn reconnecting(&mut self) {
        self.phase = ConnectionPhase::Reconnecting;
    }

    /// Restarting the connection procedure from scratch.
    pub fn awaiting_qr(&mut self) {
        self.phase = ConnectionPhase::AwaitingQr;
    }

    /// Explicit remote logout; no automatic reconnection.
    pub fn logged_out(&mut self) {
        self.phase = ConnectionPhase::LoggedOut;
    }

    /// Projects the current phase into a [`StatusSnapshot`], rendering the
    /// QR artifact when a challenge is outstanding.
    ///
    /// A rendering failure leaves `qr_data_url` empty and is logged; the
    /// raw challenge still travels in the snapshot so the local endpoint
    /// can retry rendering on demand.
    pub fn snapshot(&self) -> StatusSnapshot {
        let qr_data_url = self.phase.challenge().and_then(|challenge| {
            match qr::render_data_url(challenge) {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!(error = %e, "failed to render QR artifact");
                    None
                }
            }
        });

        StatusSnapshot {
            connected: self.phase.is_connected(),
            qr_challenge: self.phase.challenge().map(str::to_string),
            qr_data_url,
            status_text: self.phase.status_text().to_string(),
            session_identity: self.phase.identity().map(str::to_string),
        }
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_awaiting_qr() {
        let state = ConnectionState::new();
        assert_eq!(*state.phase(), ConnectionPhase::AwaitingQr);
        let snapshot = state.snapshot();
        assert!(!snapshot.connected);
        assert!(snapshot.qr_challenge.is_none());
    }

    #[test]
    fn qr_issuance_renders_artifact() {
        let mut state = ConnectionState::new();
        state.qr_issued("2@challenge-material".into());

        let snapshot = state.snapshot();
        assert!(!snapshot.connected);
        assert_eq!(snapshot.qr_challenge.as_deref(), Some("2@challenge-material"));
        assert!(
            snapshot
                .qr_data_url
                .as_deref()
                .is_some_and(|u| u.starts_with("data:image/svg+xml;base64,"))
        );
        assert_eq!(snapshot.status_text, "Scan the QR code");
    }

    #[test]
    fn session_open_clears_challenge_and_sets_identity() {
        let mut state = ConnectionState::new();
        state.qr_issued("2@challenge".into());
        state.session_opened("5511999990000".into());

        let snapshot = state.snapshot();
        assert!(snapshot.connected);
        assert!(snapshot.qr_challenge.is_none());
        assert!(snapshot.qr_data_url.is_none());
        assert_eq!(snapshot.session_identity.as_deref(), Some("5511999990000"));
        assert_eq!(snapshot.status_text, "Connected");
    }

    #[test]
    fn closing_drops_identity_and_challenge() {
        let mut state = ConnectionState::new();
        state.session_opened("5511999990000".into());
        state.closing();

        let snapshot = state.snapshot();
        assert!(!snapshot.connected);
        assert!(snapshot.qr_challenge.is_none());
        assert!(snapshot.session_identity.is_none());
        assert_eq!(snapshot.status_text, "Disconnected");
    }

    #[test]
    fn logged_out_has_manual_reauth_label() {
        let mut state = ConnectionState::new();
        state.session_opened("x".into());
        state.closing();
        state.logged_out();
        assert_eq!(state.snapshot().status_text, "Logged out - scan again");
    }
}
