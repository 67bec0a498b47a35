// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as URL schemes, delay ordering, and cache ceilings.

use zapgate_core::ZapgateError;

use crate::model::ZapgateConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns all collected validation errors (does not fail fast).
pub fn validate_config(config: &ZapgateConfig) -> Result<(), Vec<ZapgateError>> {
    let mut errors = Vec::new();

    if config.transport.sidecar_url.trim().is_empty() {
        errors.push(ZapgateError::Config(
            "transport.sidecar_url must not be empty".to_string(),
        ));
    } else if !config.transport.sidecar_url.starts_with("ws://")
        && !config.transport.sidecar_url.starts_with("wss://")
    {
        errors.push(ZapgateError::Config(format!(
            "transport.sidecar_url must be a ws:// or wss:// URL, got `{}`",
            config.transport.sidecar_url
        )));
    }

    if config.transport.auth_dir.trim().is_empty() {
        errors.push(ZapgateError::Config(
            "transport.auth_dir must not be empty".to_string(),
        ));
    }

    if !config.backend.base_url.starts_with("http://")
        && !config.backend.base_url.starts_with("https://")
    {
        errors.push(ZapgateError::Config(format!(
            "backend.base_url must be an http:// or https:// URL, got `{}`",
            config.backend.base_url
        )));
    }

    if config.backend.timeout_secs == 0 {
        errors.push(ZapgateError::Config(
            "backend.timeout_secs must be at least 1".to_string(),
        ));
    }

    if config.backend.status_interval_secs == 0 {
        errors.push(ZapgateError::Config(
            "backend.status_interval_secs must be at least 1".to_string(),
        ));
    }

    // The eviction step removes capacity/2 entries; a ceiling below 2 would
    // evict nothing and the cache would grow without bound.
    if config.relay.dedup_capacity < 2 {
        errors.push(ZapgateError::Config(format!(
            "relay.dedup_capacity must be at least 2, got {}",
            config.relay.dedup_capacity
        )));
    }

    if config.relay.reply_delay_min_ms > config.relay.reply_delay_max_ms {
        errors.push(ZapgateError::Config(format!(
            "relay.reply_delay_min_ms ({}) must not exceed reply_delay_max_ms ({})",
            config.relay.reply_delay_min_ms, config.relay.reply_delay_max_ms
        )));
    }

    if config.web.host.trim().is_empty() {
        errors.push(ZapgateError::Config(
            "web.host must not be empty".to_string(),
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
