// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire model of the protocol sidecar's newline-JSON frames.
//!
//! The sidecar speaks a small tagged-frame protocol: events flow from the
//! sidecar to the bridge, commands flow the other way. Raw message payloads
//! keep the transport library's camelCase field names.

use serde::{Deserialize, Serialize};
use zapgate_core::{CredentialBlob, DisconnectCause};

/// Frames emitted by the protocol sidecar.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SidecarEvent {
    /// A login challenge to present for scanning.
    Qr { challenge: String },
    /// The session opened; `identity` is the bound account identifier.
    Open { identity: String },
    /// The session closed.
    Close {
        #[serde(default)]
        code: Option<u16>,
        #[serde(default)]
        reason: Option<String>,
    },
    /// Rotated credential material to persist.
    Creds { name: String, data: serde_json::Value },
    /// An inbound message payload.
    Message(RawMessage),
}

/// Commands sent to the protocol sidecar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SidecarCommand {
    /// Session handshake: device display name plus persisted credentials.
    Hello {
        device_name: String,
        credentials: Vec<CredentialBlob>,
    },
    /// Deliver a text message to a peer.
    Send { chat_id: String, text: String },
    /// Send an ephemeral typing indicator.
    Presence { chat_id: String, presence: String },
    /// Close the session from our side.
    Close,
}

/// A raw inbound message as the transport library shapes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMessage {
    pub key: RawMessageKey,
    #[serde(default)]
    pub message: Option<RawMessageContent>,
}

/// Addressing and identity of a raw message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMessageKey {
    #[serde(default)]
    pub remote_jid: Option<String>,
    pub id: String,
    #[serde(default)]
    pub from_me: bool,
}

/// The payload shapes a raw message may carry text in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMessageContent {
    #[serde(default)]
    pub conversation: Option<String>,
    #[serde(default)]
    pub extended_text_message: Option<ExtendedTextMessage>,
    #[serde(default)]
    pub image_message: Option<MediaMessage>,
    #[serde(default)]
    pub video_message: Option<MediaMessage>,
}

/// Quoted/extended text payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtendedTextMessage {
    #[serde(default)]
    pub text: Option<String>,
}

/// Caption-bearing media payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaMessage {
    #[serde(default)]
    pub caption: Option<String>,
}

/// Classifies a close frame into a [`DisconnectCause`].
///
/// Priority: an explicit `logged_out` reason wins; a `bad_session` reason or
/// an authentication-rejection code (401) marks the session invalid;
/// anything else is a generic close carrying the wire code.
pub fn map_disconnect(code: Option<u16>, reason: Option<&str>) -> DisconnectCause {
    match reason {
        Some("logged_out") => DisconnectCause::LoggedOut,
        Some("bad_session") => DisconnectCause::BadSession,
        _ => match code {
            Some(401) => DisconnectCause::BadSession,
            other => DisconnectCause::Other(other),
        },
    }
}
