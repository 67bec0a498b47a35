// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Zapgate integration tests.
//!
//! Mock implementations of the core trait seams with scripted inputs and
//! captured outputs, for deterministic lifecycle and relay tests.

pub mod mock_backend;
pub mod mock_transport;

pub use mock_backend::{MockBackend, ScriptedRelay};
pub use mock_transport::MockTransport;

use zapgate_core::{ChatId, InboundMessage};

/// Builds a normalized direct-chat inbound message for tests.
pub fn make_inbound(chat_id: &str, message_id: &str, text: &str) -> InboundMessage {
    let chat_id = ChatId(chat_id.to_string());
    InboundMessage {
        is_group_or_broadcast: chat_id.is_group_or_broadcast(),
        chat_id: Some(chat_id),
        message_id: message_id.to_string(),
        text: text.to_string(),
        is_from_self: false,
    }
}
