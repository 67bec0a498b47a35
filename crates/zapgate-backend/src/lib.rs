// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend webhook client for the Zapgate bridge.
//!
//! Implements [`zapgate_core::ReasoningBackend`] over the HTTP contract:
//! `POST /webhook/status` for state synchronization and
//! `POST /webhook/message` for message relay, with a bounded per-request
//! timeout and silent tolerance of a restarting backend.

pub mod client;
pub mod types;

pub use client::BackendClient;
pub use types::{MessagePayload, MessageReply, StatusPayload};
