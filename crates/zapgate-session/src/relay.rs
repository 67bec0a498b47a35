// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message relay pipeline: admission filtering, backend forwarding, and
//! humanized reply delivery.
//!
//! Admission runs synchronously on the lifecycle manager task (it owns the
//! dedup cache); each accepted message is then relayed on its own task, so
//! in-flight relays for different chats overlap freely. A relay that fails
//! is dropped for good; retries would defeat the dedup guarantee.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use rand::Rng;
use tracing::{debug, info, warn};
use zapgate_config::model::RelayConfig;
use zapgate_core::{ChatId, InboundMessage, Presence, ReasoningBackend, TransportHandle};

use crate::dedup::DedupCache;

/// Why a message was not relayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Group/broadcast chat, or no chat identifier at all.
    NotDirectChat,
    /// Sent by the bound account itself.
    FromSelf,
    /// No textual content after normalization.
    EmptyText,
    /// Message id already seen recently.
    Duplicate,
}

impl Rejection {
    fn as_str(&self) -> &'static str {
        match self {
            Rejection::NotDirectChat => "not_direct_chat",
            Rejection::FromSelf => "from_self",
            Rejection::EmptyText => "empty_text",
            Rejection::Duplicate => "duplicate",
        }
    }
}

/// A message that passed the admission filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedMessage {
    pub chat_id: ChatId,
    pub text: String,
}

/// The relay pipeline. One instance, owned by the lifecycle manager.
pub struct RelayPipeline {
    backend: Arc<dyn ReasoningBackend>,
    dedup: DedupCache,
    delay_min: Duration,
    delay_max: Duration,
}

impl RelayPipeline {
    pub fn new(backend: Arc<dyn ReasoningBackend>, config: &RelayConfig) -> Self {
        Self {
            backend,
            dedup: DedupCache::new(config.dedup_capacity),
            delay_min: Duration::from_millis(config.reply_delay_min_ms),
            delay_max: Duration::from_millis(config.reply_delay_max_ms),
        }
    }

    /// Applies the admission filter, in order, short-circuiting on the
    /// first match. A passing message is recorded in the dedup cache.
    pub fn admit(&mut self, msg: &InboundMessage) -> Result<AcceptedMessage, Rejection> {
        let Some(chat_id) = &msg.chat_id else {
            return Err(Rejection::NotDirectChat);
        };
        if msg.is_group_or_broadcast {
            return Err(Rejection::NotDirectChat);
        }
        if msg.is_from_self {
            return Err(Rejection::FromSelf);
        }
        if msg.text.is_empty() {
            return Err(Rejection::EmptyText);
        }
        if !self.dedup.insert(&msg.message_id) {
            return Err(Rejection::Duplicate);
        }

        Ok(AcceptedMessage {
            chat_id: chat_id.clone(),
            text: msg.text.clone(),
        })
    }

    /// Runs one inbound message through the pipeline.
    ///
    /// Returns the handle of the spawned relay task for an accepted
    /// message, or `None` when the message was filtered out. The caller is
    /// free to ignore the handle; the task owns its own error handling.
    pub fn dispatch(
        &mut self,
        msg: InboundMessage,
        transport: Arc<dyn TransportHandle>,
    ) -> Option<tokio::task::JoinHandle<()>> {
        match self.admit(&msg) {
            Err(rejection) => {
                counter!("zapgate_messages_rejected_total", "reason" => rejection.as_str())
                    .increment(1);
                debug!(
                    message_id = msg.message_id.as_str(),
                    reason = rejection.as_str(),
                    "inbound message filtered"
                );
                None
            }
            Ok(accepted) => {
                counter!("zapgate_messages_accepted_total").increment(1);
                info!(
                    chat = accepted.chat_id.user_part(),
                    preview = preview(&accepted.text),
                    "relaying customer message"
                );
                let backend = self.backend.clone();
                let (delay_min, delay_max) = (self.delay_min, self.delay_max);
                Some(tokio::spawn(async move {
                    relay_accepted(backend, transport, accepted, delay_min, delay_max).await;
                }))
            }
        }
    }
}

/// Forwards an accepted message to the backend and delivers the reply with
/// humanized timing. All failures end here: logged, never propagated.
async fn relay_accepted(
    backend: Arc<dyn ReasoningBackend>,
    transport: Arc<dyn TransportHandle>,
    accepted: AcceptedMessage,
    delay_min: Duration,
    delay_max: Duration,
) {
    let reply = match backend.relay_message(&accepted.chat_id, &accepted.text).await {
        Ok(Some(reply)) => reply,
        // No reply generated, or the backend is restarting.
        Ok(None) => return,
        Err(e) => {
            warn!(
                chat = accepted.chat_id.user_part(),
                error = %e,
                "backend relay failed, dropping message"
            );
            return;
        }
    };

    // Typing indicators are cosmetic; their failures are swallowed.
    if let Err(e) = transport
        .send_presence(&accepted.chat_id, Presence::Composing)
        .await
    {
        debug!(error = %e, "presence update failed");
    }

    tokio::time::sleep(humanized_delay(delay_min, delay_max)).await;

    if let Err(e) = transport
        .send_presence(&accepted.chat_id, Presence::Paused)
        .await
    {
        debug!(error = %e, "presence update failed");
    }

    match transport.send_text(&accepted.chat_id, &reply).await {
        Ok(()) => {
            counter!("zapgate_replies_sent_total").increment(1);
            info!(chat = accepted.chat_id.user_part(), "reply delivered");
        }
        Err(e) => {
            warn!(
                chat = accepted.chat_id.user_part(),
                error = %e,
                "failed to deliver reply"
            );
        }
    }
}

/// Uniformly distributed delay in `[min, max)`.
fn humanized_delay(min: Duration, max: Duration) -> Duration {
    if max <= min {
        return min;
    }
    let ms = rand::thread_rng().gen_range(min.as_millis() as u64..max.as_millis() as u64);
    Duration::from_millis(ms)
}

/// First 100 characters of the text, for log lines.
fn preview(text: &str) -> String {
    if text.chars().count() <= 100 {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(100).collect();
        format!("{truncated}...")
    }
}
