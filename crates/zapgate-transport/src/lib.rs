// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sidecar transport driver for the Zapgate bridge.
//!
//! Implements [`zapgate_core::TransportDriver`] over a WebSocket connection
//! to the wire-protocol sidecar, including the frame model, raw payload
//! normalization, and disconnect-cause classification.

pub mod driver;
pub mod normalize;
pub mod wire;

pub use driver::WsTransport;
