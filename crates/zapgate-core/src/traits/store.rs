// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential store trait for persisted session material.

use async_trait::async_trait;

use crate::error::ZapgateError;
use crate::types::CredentialBlob;

/// Persistence for opaque transport credential material.
///
/// Single-writer: only the lifecycle manager saves and deletes; blobs are
/// read once per connection attempt.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads all persisted blobs. An empty result means a fresh pairing.
    async fn load_all(&self) -> Result<Vec<CredentialBlob>, ZapgateError>;

    /// Persists one blob, overwriting any previous blob with the same name.
    async fn save(&self, blob: &CredentialBlob) -> Result<(), ZapgateError>;

    /// Purges all persisted credential material.
    async fn delete_all(&self) -> Result<(), ZapgateError>;
}
