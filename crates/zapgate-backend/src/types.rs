// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire structs for the backend webhook contract.

use serde::{Deserialize, Serialize};
use zapgate_core::StatusSnapshot;

/// Request body for `POST /webhook/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusPayload {
    /// Whether a transport session is established.
    pub connected: bool,
    /// Rendered login challenge as a data URL, when one is outstanding.
    pub qr_code: Option<String>,
    /// Human-readable connection phase label.
    pub status_text: String,
    /// Bound account identifier, when connected.
    pub phone_number: Option<String>,
}

impl From<&StatusSnapshot> for StatusPayload {
    fn from(snapshot: &StatusSnapshot) -> Self {
        Self {
            connected: snapshot.connected,
            qr_code: snapshot.qr_data_url.clone(),
            status_text: snapshot.status_text.clone(),
            phone_number: snapshot.session_identity.clone(),
        }
    }
}

/// Request body for `POST /webhook/message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePayload {
    /// Originating chat identifier.
    pub chat_id: String,
    /// Normalized customer message text.
    pub message: String,
}

/// Response body of `POST /webhook/message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageReply {
    /// Generated reply text; absent or null when the backend declines to
    /// answer.
    #[serde(default)]
    pub response: Option<String>,
}
