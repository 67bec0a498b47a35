// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the reasoning/operations backend webhooks.
//!
//! Provides [`BackendClient`], which posts status snapshots and relays
//! accepted customer messages. A connection-refused condition is swallowed
//! silently (the backend restarting is an expected, recoverable state);
//! every other failure is surfaced as [`ZapgateError::Backend`] for the
//! caller to log.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;
use zapgate_config::model::BackendConfig;
use zapgate_core::{ChatId, ReasoningBackend, StatusSnapshot, ZapgateError};

use crate::types::{MessagePayload, MessageReply, StatusPayload};

/// HTTP client for backend webhook communication.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a new backend client with the configured per-request timeout.
    pub fn new(config: &BackendConfig) -> Result<Self, ZapgateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ZapgateError::Backend {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Posts a JSON body to a webhook path.
    ///
    /// Returns `Ok(None)` when the backend refused the connection; the
    /// caller treats that as "nothing happened".
    async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<reqwest::Response>, ZapgateError> {
        let url = format!("{}{path}", self.base_url);
        match self.client.post(&url).json(body).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    Ok(Some(response))
                } else {
                    Err(ZapgateError::Backend {
                        message: format!("POST {path} returned {status}"),
                        source: None,
                    })
                }
            }
            Err(e) if e.is_connect() => {
                debug!(path, "backend unreachable, dropping request");
                Ok(None)
            }
            Err(e) => Err(ZapgateError::Backend {
                message: format!("POST {path} failed: {e}"),
                source: Some(Box::new(e)),
            }),
        }
    }
}

#[async_trait]
impl ReasoningBackend for BackendClient {
    async fn push_status(&self, snapshot: &StatusSnapshot) -> Result<(), ZapgateError> {
        let payload = StatusPayload::from(snapshot);
        self.post("/webhook/status", &payload).await?;
        Ok(())
    }

    async fn relay_message(
        &self,
        chat_id: &ChatId,
        text: &str,
    ) -> Result<Option<String>, ZapgateError> {
        let payload = MessagePayload {
            chat_id: chat_id.0.clone(),
            message: text.to_string(),
        };

        let Some(response) = self.post("/webhook/message", &payload).await? else {
            return Ok(None);
        };

        let reply: MessageReply =
            response.json().await.map_err(|e| ZapgateError::Backend {
                message: format!("invalid /webhook/message response body: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(reply.response)
    }
}
