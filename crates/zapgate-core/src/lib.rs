// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Zapgate bridge.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Zapgate workspace: the transport driver
//! seam, the reasoning backend contract, the credential store, and the
//! connection-state model shared by the lifecycle manager and the
//! observability surfaces.

pub mod error;
pub mod qr;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ZapgateError;
pub use types::{
    ChatId, ConnectionPhase, CredentialBlob, DisconnectCause, InboundMessage, Presence,
    StatusSnapshot, TransportEvent,
};

// Re-export all traits at crate root.
pub use traits::{
    CredentialStore, ReasoningBackend, TransportConnection, TransportDriver, TransportHandle,
};
