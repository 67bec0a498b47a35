// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared between the lifecycle manager, the relay pipeline,
//! the transport driver, and the observability surfaces.

use serde::{Deserialize, Serialize};

/// Opaque peer identifier on the transport network (a JID-style address).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub String);

impl ChatId {
    /// Whether this address denotes a group chat or the broadcast channel.
    ///
    /// Group JIDs end in `@g.us`; status broadcasts use the fixed
    /// `status@broadcast` address.
    pub fn is_group_or_broadcast(&self) -> bool {
        self.0.ends_with("@g.us") || self.0 == "status@broadcast"
    }

    /// The user-visible part of the address (everything before `@`),
    /// used for log lines so full JIDs stay out of the logs.
    pub fn user_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Phase of the transport connection lifecycle.
///
/// The login challenge and the session identity live inside their phases, so
/// a state carrying both at once cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionPhase {
    /// Startup or post-reconnect: no session, no challenge yet.
    AwaitingQr,
    /// The transport issued a login challenge awaiting a device scan.
    QrIssued { challenge: String },
    /// Session established; `identity` is the bound account identifier
    /// (phone number).
    Connected { identity: String },
    /// The transport reported a close; the cause is being evaluated.
    Closing,
    /// Waiting out a cooldown before the next connection attempt.
    Reconnecting,
    /// Explicit remote logout; manual re-authentication required.
    LoggedOut,
}

impl ConnectionPhase {
    /// Human-readable label for observers, derived from the phase so the
    /// two can never disagree.
    pub fn status_text(&self) -> &'static str {
        match self {
            ConnectionPhase::AwaitingQr => "Waiting for connection",
            ConnectionPhase::QrIssued { .. } => "Scan the QR code",
            ConnectionPhase::Connected { .. } => "Connected",
            ConnectionPhase::Closing => "Disconnected",
            ConnectionPhase::Reconnecting => "Reconnecting...",
            ConnectionPhase::LoggedOut => "Logged out - scan again",
        }
    }

    /// Whether a session is currently established.
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionPhase::Connected { .. })
    }

    /// The pending login challenge, if one is outstanding.
    pub fn challenge(&self) -> Option<&str> {
        match self {
            ConnectionPhase::QrIssued { challenge } => Some(challenge),
            _ => None,
        }
    }

    /// The bound session identity, if connected.
    pub fn identity(&self) -> Option<&str> {
        match self {
            ConnectionPhase::Connected { identity } => Some(identity),
            _ => None,
        }
    }
}

/// Classified cause of a transport session close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectCause {
    /// The account was explicitly logged out from the paired device.
    LoggedOut,
    /// The stored session is invalid or corrupt (includes authentication
    /// rejection).
    BadSession,
    /// Any other close, with the wire status code when one was reported.
    Other(Option<u16>),
}

/// Ephemeral typing indicator sent to a peer without message content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Composing,
    Paused,
}

impl Presence {
    /// Wire representation of the presence state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Presence::Composing => "composing",
            Presence::Paused => "paused",
        }
    }
}

/// A normalized view of an inbound transport message.
///
/// Produced by the transport driver from raw payloads; several payload
/// shapes (plain text, caption-bearing media) collapse into one `text`.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Originating chat, when the payload carried one.
    pub chat_id: Option<ChatId>,
    /// Stable per-event identifier used for deduplication.
    pub message_id: String,
    /// Normalized text content; empty when no textual source was present.
    pub text: String,
    /// Whether the message was sent by the bound account itself.
    pub is_from_self: bool,
    /// Whether the originating chat is a group or broadcast channel.
    pub is_group_or_broadcast: bool,
}

/// Opaque credential material emitted by the transport layer.
///
/// The core never inspects `data`; it only round-trips blobs between the
/// transport and the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialBlob {
    /// Store key for the blob (file name in the default store).
    pub name: String,
    /// The credential payload as received from the transport.
    pub data: serde_json::Value,
}

/// An event surfaced by a live transport session.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// A login challenge was issued and should be presented for scanning.
    QrIssued { challenge: String },
    /// The session opened; `identity` is the bound account identifier.
    SessionOpen { identity: String },
    /// The session closed with a classified cause.
    SessionClosed { cause: DisconnectCause },
    /// Credential material rotated and must be persisted immediately.
    CredentialsRotated(CredentialBlob),
    /// An inbound message, already normalized by the driver.
    Message(InboundMessage),
}

/// Point-in-time projection of connection state for observers.
///
/// Regenerated on every phase change and re-sent on the publish timer.
/// `qr_challenge` is carried alongside the rendered data URL so the local
/// endpoint can re-render raw image bytes without reaching into the
/// lifecycle manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub connected: bool,
    pub qr_challenge: Option<String>,
    pub qr_data_url: Option<String>,
    pub status_text: String,
    pub session_identity: Option<String>,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            connected: false,
            qr_challenge: None,
            qr_data_url: None,
            status_text: ConnectionPhase::AwaitingQr.status_text().to_string(),
            session_identity: None,
        }
    }
}
