// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem credential store: a directory of opaque JSON blobs.
//!
//! Mirrors the transport library's multi-file auth layout: one file per
//! blob, named after the blob key. The content is never inspected here.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, warn};
use zapgate_core::{CredentialBlob, CredentialStore, ZapgateError};

/// Credential store backed by a directory of `<name>.json` files.
pub struct FsCredentialStore {
    dir: PathBuf,
}

impl FsCredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn blob_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_name(name)))
    }
}

/// Replaces path-hostile characters in a blob name with `-`.
///
/// Rotation blob names can contain key-material identifiers with `/` and
/// `+` from base64; the sanitized form keeps names collision-resistant
/// enough for the small per-session blob set.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

fn store_err(e: std::io::Error) -> ZapgateError {
    ZapgateError::Store {
        source: Box::new(e),
    }
}

#[async_trait]
impl CredentialStore for FsCredentialStore {
    async fn load_all(&self) -> Result<Vec<CredentialBlob>, ZapgateError> {
        if !self.dir.exists() {
            debug!(dir = %self.dir.display(), "no credential directory, pairing fresh");
            return Ok(Vec::new());
        }

        let mut blobs = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(store_err)?;
        while let Some(entry) = entries.next_entry().await.map_err(store_err)? {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let bytes = tokio::fs::read(&path).await.map_err(store_err)?;
            match serde_json::from_slice::<serde_json::Value>(&bytes) {
                Ok(data) => blobs.push(CredentialBlob {
                    name: name.to_string(),
                    data,
                }),
                Err(e) => {
                    // A torn write from a crash; the transport re-issues
                    // rotations, so skipping is safe.
                    warn!(file = %path.display(), error = %e, "skipping unreadable credential blob");
                }
            }
        }

        debug!(count = blobs.len(), "loaded credential blobs");
        Ok(blobs)
    }

    async fn save(&self, blob: &CredentialBlob) -> Result<(), ZapgateError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(store_err)?;
        let bytes = serde_json::to_vec(&blob.data).map_err(|e| ZapgateError::Store {
            source: Box::new(e),
        })?;
        tokio::fs::write(self.blob_path(&blob.name), bytes)
            .await
            .map_err(store_err)
    }

    async fn delete_all(&self) -> Result<(), ZapgateError> {
        if !self.dir.exists() {
            return Ok(());
        }
        tokio::fs::remove_dir_all(&self.dir).await.map_err(store_err)
    }
}
