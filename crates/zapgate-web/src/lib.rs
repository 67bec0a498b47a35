// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local HTTP observability endpoint for the Zapgate bridge.
//!
//! Exposes the current status snapshot and the QR artifact to local
//! observers: `GET /qr-data`, `GET /qr`, `GET /status`, and a minimal HTML
//! status page at `/`. Strictly a read projection over the status watch
//! channel.

pub mod handlers;
pub mod server;

pub use server::{WebState, router, start_server};
