// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket transport driver speaking the sidecar frame protocol.
//!
//! [`WsTransport`] opens one WebSocket per session attempt, performs the
//! `hello` handshake (device name + persisted credentials), then splits the
//! socket: a reader task decodes sidecar events into [`TransportEvent`]s,
//! and a writer task drains the command channel exposed through the
//! session handle.

use std::sync::Arc;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, warn};
use zapgate_config::model::TransportConfig;
use zapgate_core::{
    ChatId, CredentialBlob, DisconnectCause, Presence, TransportConnection, TransportDriver,
    TransportEvent, TransportHandle, ZapgateError,
};

use crate::normalize;
use crate::wire::{SidecarCommand, SidecarEvent, map_disconnect};

/// Transport driver backed by a protocol sidecar over WebSocket.
pub struct WsTransport {
    config: TransportConfig,
}

impl WsTransport {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl TransportDriver for WsTransport {
    async fn connect(
        &self,
        credentials: Vec<CredentialBlob>,
    ) -> Result<TransportConnection, ZapgateError> {
        let (socket, _) = connect_async(self.config.sidecar_url.as_str()).await.map_err(|e| {
            ZapgateError::Transport {
                message: format!(
                    "failed to reach sidecar at {}: {e}",
                    self.config.sidecar_url
                ),
                source: Some(Box::new(e)),
            }
        })?;
        let (mut sink, mut stream) = socket.split();

        // Handshake before handing the sink to the writer task.
        let hello = SidecarCommand::Hello {
            device_name: self.config.device_name.clone(),
            credentials,
        };
        let frame = serde_json::to_string(&hello).map_err(|e| ZapgateError::Transport {
            message: format!("failed to encode handshake: {e}"),
            source: Some(Box::new(e)),
        })?;
        sink.send(Message::Text(frame.into()))
            .await
            .map_err(|e| ZapgateError::Transport {
                message: format!("handshake send failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let (event_tx, event_rx) = mpsc::channel::<TransportEvent>(100);
        let (cmd_tx, mut cmd_rx) = mpsc::channel::<SidecarCommand>(32);

        // Writer: drain commands into the socket until the handle is dropped
        // or the socket dies.
        tokio::spawn(async move {
            while let Some(cmd) = cmd_rx.recv().await {
                let frame = match serde_json::to_string(&cmd) {
                    Ok(frame) => frame,
                    Err(e) => {
                        warn!(error = %e, "failed to encode sidecar command, dropping");
                        continue;
                    }
                };
                if sink.send(Message::Text(frame.into())).await.is_err() {
                    debug!("sidecar command sink closed");
                    break;
                }
            }
        });

        // Reader: decode frames into transport events until close.
        tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        let event = match serde_json::from_str::<SidecarEvent>(text.as_str()) {
                            Ok(event) => event,
                            Err(e) => {
                                warn!(error = %e, "discarding malformed sidecar frame");
                                continue;
                            }
                        };
                        let closing = matches!(event, SidecarEvent::Close { .. });
                        if event_tx.send(convert_event(event)).await.is_err() {
                            debug!("event receiver dropped, stopping reader");
                            return;
                        }
                        if closing {
                            return;
                        }
                    }
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {} // ping/pong/binary frames carry no events
                    Err(e) => {
                        warn!(error = %e, "sidecar socket error");
                        break;
                    }
                }
            }
            // Socket ended without a close frame: surface a generic close so
            // the lifecycle manager can run its reconnect policy.
            let _ = event_tx
                .send(TransportEvent::SessionClosed {
                    cause: DisconnectCause::Other(None),
                })
                .await;
        });

        Ok(TransportConnection {
            events: event_rx,
            handle: Arc::new(WsHandle { cmd_tx }),
        })
    }
}

/// Command handle for a live WebSocket session.
struct WsHandle {
    cmd_tx: mpsc::Sender<SidecarCommand>,
}

impl WsHandle {
    async fn send_command(&self, cmd: SidecarCommand) -> Result<(), ZapgateError> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| ZapgateError::Transport {
                message: "transport session closed".into(),
                source: None,
            })
    }
}

#[async_trait]
impl TransportHandle for WsHandle {
    async fn send_text(&self, chat_id: &ChatId, text: &str) -> Result<(), ZapgateError> {
        self.send_command(SidecarCommand::Send {
            chat_id: chat_id.0.clone(),
            text: text.to_string(),
        })
        .await
    }

    async fn send_presence(
        &self,
        chat_id: &ChatId,
        presence: Presence,
    ) -> Result<(), ZapgateError> {
        self.send_command(SidecarCommand::Presence {
            chat_id: chat_id.0.clone(),
            presence: presence.as_str().to_string(),
        })
        .await
    }

    async fn close(&self) -> Result<(), ZapgateError> {
        self.send_command(SidecarCommand::Close).await
    }
}

/// Maps a decoded sidecar event to the core transport event model.
fn convert_event(event: SidecarEvent) -> TransportEvent {
    match event {
        SidecarEvent::Qr { challenge } => TransportEvent::QrIssued { challenge },
        SidecarEvent::Open { identity } => TransportEvent::SessionOpen { identity },
        SidecarEvent::Close { code, reason } => TransportEvent::SessionClosed {
            cause: map_disconnect(code, reason.as_deref()),
        },
        SidecarEvent::Creds { name, data } => {
            TransportEvent::CredentialsRotated(CredentialBlob { name, data })
        }
        SidecarEvent::Message(raw) => {
            TransportEvent::Message(normalize::to_inbound_message(&raw))
        }
    }
}
