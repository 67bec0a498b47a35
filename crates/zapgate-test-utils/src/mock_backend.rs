// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock reasoning backend for deterministic testing.
//!
//! `MockBackend` implements `ReasoningBackend` with scripted relay outcomes
//! and captured calls: relayed messages and pushed status snapshots are
//! retrievable for assertion.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use zapgate_core::{ChatId, ReasoningBackend, StatusSnapshot, ZapgateError};

/// A scripted outcome for one `relay_message` call.
#[derive(Debug, Clone)]
pub enum ScriptedRelay {
    /// Return this reply (or no reply).
    Reply(Option<String>),
    /// Fail with a backend error (simulates timeouts / 5xx).
    Error,
}

#[derive(Default)]
struct MockBackendState {
    scripted: VecDeque<ScriptedRelay>,
    default_reply: Option<String>,
    relayed: Vec<(ChatId, String)>,
    statuses: Vec<StatusSnapshot>,
}

/// A mock backend capturing every interaction.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockBackendState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the outcome of the next unscripted `relay_message` call.
    pub async fn push_relay(&self, outcome: ScriptedRelay) {
        self.state.lock().await.scripted.push_back(outcome);
    }

    /// Reply returned when the script queue is empty (default: no reply).
    pub async fn set_default_reply(&self, reply: Option<String>) {
        self.state.lock().await.default_reply = reply;
    }

    /// All `(chat_id, text)` pairs relayed so far.
    pub async fn relayed(&self) -> Vec<(ChatId, String)> {
        self.state.lock().await.relayed.clone()
    }

    /// Number of relayed messages.
    pub async fn relay_count(&self) -> usize {
        self.state.lock().await.relayed.len()
    }

    /// All pushed status snapshots, in order.
    pub async fn statuses(&self) -> Vec<StatusSnapshot> {
        self.state.lock().await.statuses.clone()
    }

    /// The most recently pushed status snapshot.
    pub async fn last_status(&self) -> Option<StatusSnapshot> {
        self.state.lock().await.statuses.last().cloned()
    }
}

#[async_trait]
impl ReasoningBackend for MockBackend {
    async fn push_status(&self, snapshot: &StatusSnapshot) -> Result<(), ZapgateError> {
        self.state.lock().await.statuses.push(snapshot.clone());
        Ok(())
    }

    async fn relay_message(
        &self,
        chat_id: &ChatId,
        text: &str,
    ) -> Result<Option<String>, ZapgateError> {
        let mut state = self.state.lock().await;
        state.relayed.push((chat_id.clone(), text.to_string()));

        match state.scripted.pop_front() {
            Some(ScriptedRelay::Reply(reply)) => Ok(reply),
            Some(ScriptedRelay::Error) => Err(ZapgateError::Backend {
                message: "scripted backend failure".into(),
                source: None,
            }),
            None => Ok(state.default_reply.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_outcomes_are_consumed_in_order() {
        let backend = MockBackend::new();
        backend
            .push_relay(ScriptedRelay::Reply(Some("first".into())))
            .await;
        backend.push_relay(ScriptedRelay::Error).await;

        let chat = ChatId("a@s.whatsapp.net".into());
        let reply = backend.relay_message(&chat, "one").await.unwrap();
        assert_eq!(reply.as_deref(), Some("first"));

        assert!(backend.relay_message(&chat, "two").await.is_err());

        // Queue drained: falls back to the default (no reply).
        let reply = backend.relay_message(&chat, "three").await.unwrap();
        assert!(reply.is_none());

        assert_eq!(backend.relay_count().await, 3);
    }

    #[tokio::test]
    async fn statuses_are_captured_in_order() {
        let backend = MockBackend::new();
        backend.push_status(&StatusSnapshot::default()).await.unwrap();
        let mut connected = StatusSnapshot::default();
        connected.connected = true;
        backend.push_status(&connected).await.unwrap();

        let statuses = backend.statuses().await;
        assert_eq!(statuses.len(), 2);
        assert!(!statuses[0].connected);
        assert!(statuses[1].connected);
        assert!(backend.last_status().await.unwrap().connected);
    }
}
