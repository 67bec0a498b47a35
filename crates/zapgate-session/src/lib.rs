// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection lifecycle and message relay core for the Zapgate bridge.
//!
//! Owns the transport session state machine, the dedup cache, the relay
//! pipeline with humanized reply delivery, the periodic status publisher,
//! and the filesystem credential store. All connection-state mutation
//! happens on the single lifecycle manager task; other components observe
//! state through `watch`-distributed [`zapgate_core::StatusSnapshot`]s.

pub mod creds;
pub mod dedup;
pub mod lifecycle;
pub mod publisher;
pub mod relay;
pub mod shutdown;
pub mod state;

pub use creds::FsCredentialStore;
pub use dedup::DedupCache;
pub use lifecycle::{LifecycleManager, ReconnectDecision, decide};
pub use publisher::StatusPublisher;
pub use relay::{RelayPipeline, Rejection};
pub use state::ConnectionState;
