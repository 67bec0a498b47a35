// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Zapgate bridge.

use thiserror::Error;

/// The primary error type used across all Zapgate traits and core operations.
#[derive(Debug, Error)]
pub enum ZapgateError {
    /// Configuration errors (invalid TOML, missing required fields, bad ranges).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport session errors (sidecar unreachable, command channel closed,
    /// malformed wire frames).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Reasoning backend errors (HTTP failure, unexpected status, bad body).
    #[error("backend error: {message}")]
    Backend {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Credential store errors (unreadable auth directory, write failure).
    #[error("credential store error: {source}")]
    Store {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// QR artifact rendering failures.
    #[error("artifact rendering failed: {0}")]
    Render(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
