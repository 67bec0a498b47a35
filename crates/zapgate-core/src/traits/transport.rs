// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport driver trait: the seam where the wire protocol engine plugs in.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::ZapgateError;
use crate::types::{ChatId, CredentialBlob, Presence, TransportEvent};

/// A live transport session: its event stream plus the command handle.
///
/// The event receiver is consumed by exactly one owner (the lifecycle
/// manager); the handle is cheaply cloneable via `Arc` so in-flight relay
/// tasks can deliver replies while the manager keeps consuming events.
pub struct TransportConnection {
    pub events: mpsc::Receiver<TransportEvent>,
    pub handle: Arc<dyn TransportHandle>,
}

impl std::fmt::Debug for TransportConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportConnection")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

/// Opens transport sessions against the chat network.
///
/// One `connect` call corresponds to one session attempt; the returned
/// connection lives until a [`TransportEvent::SessionClosed`] arrives or the
/// event stream ends. Reconnection policy lives with the caller, not here.
#[async_trait]
pub trait TransportDriver: Send + Sync {
    /// Opens a new transport session, supplying any persisted credentials.
    ///
    /// An empty credential set starts a fresh pairing (the session will emit
    /// a login challenge).
    async fn connect(
        &self,
        credentials: Vec<CredentialBlob>,
    ) -> Result<TransportConnection, ZapgateError>;
}

/// Commands accepted by a live transport session.
#[async_trait]
pub trait TransportHandle: Send + Sync {
    /// Delivers a text message to a peer.
    async fn send_text(&self, chat_id: &ChatId, text: &str) -> Result<(), ZapgateError>;

    /// Sends an ephemeral typing indicator to a peer.
    async fn send_presence(
        &self,
        chat_id: &ChatId,
        presence: Presence,
    ) -> Result<(), ZapgateError>;

    /// Closes the session from our side.
    async fn close(&self) -> Result<(), ZapgateError>;
}
