// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./zapgate.toml` > `~/.config/zapgate/zapgate.toml`
//! > `/etc/zapgate/zapgate.toml` with environment variable overrides via the
//! `ZAPGATE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ZapgateConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/zapgate/zapgate.toml` (system-wide)
/// 3. `~/.config/zapgate/zapgate.toml` (user XDG config)
/// 4. `./zapgate.toml` (local directory)
/// 5. `ZAPGATE_*` environment variables
pub fn load_config() -> Result<ZapgateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ZapgateConfig::default()))
        .merge(Toml::file("/etc/zapgate/zapgate.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("zapgate/zapgate.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("zapgate.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<ZapgateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ZapgateConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ZapgateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ZapgateConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `ZAPGATE_BACKEND_BASE_URL` must map to
/// `backend.base_url`, not `backend.base.url`.
fn env_provider() -> Env {
    Env::prefixed("ZAPGATE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: ZAPGATE_BACKEND_BASE_URL -> "backend_base_url"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("transport_", "transport.", 1)
            .replacen("backend_", "backend.", 1)
            .replacen("relay_", "relay.", 1)
            .replacen("web_", "web.", 1);
        mapped.into()
    })
}
