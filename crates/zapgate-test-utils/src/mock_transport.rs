// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock transport driver for deterministic testing.
//!
//! `MockTransport` implements `TransportDriver` with injectable events and
//! captured outbound commands. Each `connect()` call opens a fresh session
//! channel; tests emit events into the current session and assert on the
//! texts and presence updates the bridge sent back.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use zapgate_core::{
    ChatId, CredentialBlob, Presence, TransportConnection, TransportDriver, TransportEvent,
    TransportHandle, ZapgateError,
};

#[derive(Default)]
struct MockTransportState {
    connect_count: usize,
    /// Credentials supplied to each connect call, in order.
    connect_credentials: Vec<Vec<CredentialBlob>>,
    /// Sender for the currently live session, if any.
    session_tx: Option<mpsc::Sender<TransportEvent>>,
    /// Events scripted before the next connect; drained into the session
    /// channel as soon as it opens.
    scripted: VecDeque<TransportEvent>,
    /// Captured `send_text` calls.
    sent_texts: Vec<(ChatId, String)>,
    /// Captured `send_presence` calls.
    presence_updates: Vec<(ChatId, Presence)>,
    /// Number of leading connect attempts that should fail.
    failing_connects: usize,
}

/// A mock transport for testing the lifecycle manager and relay pipeline.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockTransportState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts an event for the next (or current) session.
    pub async fn emit(&self, event: TransportEvent) {
        let mut state = self.state.lock().await;
        if let Some(tx) = state.session_tx.clone() {
            drop(state);
            let _ = tx.send(event).await;
        } else {
            state.scripted.push_back(event);
        }
    }

    /// Makes the next `n` connect attempts fail with a transport error.
    pub async fn fail_next_connects(&self, n: usize) {
        self.state.lock().await.failing_connects = n;
    }

    /// Number of completed connect calls.
    pub async fn connect_count(&self) -> usize {
        self.state.lock().await.connect_count
    }

    /// Credentials passed to connect call `index`.
    pub async fn credentials_for_connect(&self, index: usize) -> Option<Vec<CredentialBlob>> {
        self.state.lock().await.connect_credentials.get(index).cloned()
    }

    /// All texts sent through any session handle.
    pub async fn sent_texts(&self) -> Vec<(ChatId, String)> {
        self.state.lock().await.sent_texts.clone()
    }

    /// All presence updates sent through any session handle.
    pub async fn presence_updates(&self) -> Vec<(ChatId, Presence)> {
        self.state.lock().await.presence_updates.clone()
    }

    /// Waits until at least `n` connect calls have completed.
    ///
    /// Polls with short sleeps; under a paused tokio clock the sleeps
    /// auto-advance, so this stays deterministic.
    pub async fn wait_for_connects(&self, n: usize) {
        loop {
            if self.connect_count().await >= n {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Waits until at least `n` texts have been sent.
    pub async fn wait_for_sent_texts(&self, n: usize) {
        loop {
            if self.state.lock().await.sent_texts.len() >= n {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl TransportDriver for MockTransport {
    async fn connect(
        &self,
        credentials: Vec<CredentialBlob>,
    ) -> Result<TransportConnection, ZapgateError> {
        let mut state = self.state.lock().await;

        if state.failing_connects > 0 {
            state.failing_connects -= 1;
            return Err(ZapgateError::Transport {
                message: "scripted connect failure".into(),
                source: None,
            });
        }

        state.connect_count += 1;
        state.connect_credentials.push(credentials);

        let (tx, rx) = mpsc::channel(64);
        // Drain any events scripted before this session opened.
        while let Some(event) = state.scripted.pop_front() {
            let _ = tx.try_send(event);
        }
        state.session_tx = Some(tx);

        Ok(TransportConnection {
            events: rx,
            handle: Arc::new(MockHandle {
                state: self.state.clone(),
            }),
        })
    }
}

struct MockHandle {
    state: Arc<Mutex<MockTransportState>>,
}

#[async_trait]
impl TransportHandle for MockHandle {
    async fn send_text(&self, chat_id: &ChatId, text: &str) -> Result<(), ZapgateError> {
        self.state
            .lock()
            .await
            .sent_texts
            .push((chat_id.clone(), text.to_string()));
        Ok(())
    }

    async fn send_presence(
        &self,
        chat_id: &ChatId,
        presence: Presence,
    ) -> Result<(), ZapgateError> {
        self.state
            .lock()
            .await
            .presence_updates
            .push((chat_id.clone(), presence));
        Ok(())
    }

    async fn close(&self) -> Result<(), ZapgateError> {
        self.state.lock().await.session_tx = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_events_are_delivered_after_connect() {
        let transport = MockTransport::new();
        transport
            .emit(TransportEvent::QrIssued {
                challenge: "2@abc".into(),
            })
            .await;

        let mut conn = transport.connect(Vec::new()).await.unwrap();
        match conn.events.recv().await.unwrap() {
            TransportEvent::QrIssued { challenge } => assert_eq!(challenge, "2@abc"),
            other => panic!("expected QrIssued, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn handle_captures_texts_and_presence() {
        let transport = MockTransport::new();
        let conn = transport.connect(Vec::new()).await.unwrap();

        let chat = ChatId("a@s.whatsapp.net".into());
        conn.handle.send_presence(&chat, Presence::Composing).await.unwrap();
        conn.handle.send_text(&chat, "hello").await.unwrap();

        assert_eq!(transport.presence_updates().await.len(), 1);
        let texts = transport.sent_texts().await;
        assert_eq!(texts, vec![(chat, "hello".to_string())]);
    }

    #[tokio::test]
    async fn scripted_connect_failures_are_consumed() {
        let transport = MockTransport::new();
        transport.fail_next_connects(1).await;

        assert!(transport.connect(Vec::new()).await.is_err());
        assert!(transport.connect(Vec::new()).await.is_ok());
        assert_eq!(transport.connect_count().await, 1);
    }
}
