// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reasoning backend trait: the HTTP collaborator that generates replies
//! and observes connection state.

use async_trait::async_trait;

use crate::error::ZapgateError;
use crate::types::{ChatId, StatusSnapshot};

/// The external reasoning/operations backend.
///
/// Implementations must treat an unreachable backend (connection refused) as
/// a silent no-op: `push_status` returns `Ok(())` and `relay_message`
/// returns `Ok(None)`, because the backend restarting is an expected
/// condition, not an error. Any other failure is returned for the caller to
/// log; callers never crash on backend errors.
#[async_trait]
pub trait ReasoningBackend: Send + Sync {
    /// Pushes the current status snapshot. Best-effort: no retries, no acks;
    /// the next publish tick resends the current truth.
    async fn push_status(&self, snapshot: &StatusSnapshot) -> Result<(), ZapgateError>;

    /// Relays an accepted customer message and returns the generated reply
    /// text, or `None` when the backend has nothing to say (or is
    /// unreachable).
    async fn relay_message(
        &self,
        chat_id: &ChatId,
        text: &str,
    ) -> Result<Option<String>, ZapgateError>;
}
