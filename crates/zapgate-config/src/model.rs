// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Zapgate bridge.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Zapgate configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ZapgateConfig {
    /// Daemon identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Transport session and reconnection settings.
    #[serde(default)]
    pub transport: TransportConfig,

    /// Reasoning backend HTTP settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Relay pipeline settings (dedup, humanized delay).
    #[serde(default)]
    pub relay: RelayConfig,

    /// Local observability endpoint settings.
    #[serde(default)]
    pub web: WebConfig,
}

/// Daemon identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the bridge, reported to the sidecar as the paired
    /// device name prefix.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "zapgate".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Transport session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TransportConfig {
    /// WebSocket URL of the protocol sidecar.
    #[serde(default = "default_sidecar_url")]
    pub sidecar_url: String,

    /// Directory holding persisted credential blobs.
    #[serde(default = "default_auth_dir")]
    pub auth_dir: String,

    /// Device display name announced during pairing.
    #[serde(default = "default_device_name")]
    pub device_name: String,

    /// Cooldown before reconnecting after a generic close, in seconds.
    #[serde(default = "default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,

    /// Cooldown before reconnecting after an invalid-session close, in
    /// seconds.
    #[serde(default = "default_bad_session_delay_secs")]
    pub bad_session_delay_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            sidecar_url: default_sidecar_url(),
            auth_dir: default_auth_dir(),
            device_name: default_device_name(),
            reconnect_delay_secs: default_reconnect_delay_secs(),
            bad_session_delay_secs: default_bad_session_delay_secs(),
        }
    }
}

fn default_sidecar_url() -> String {
    "ws://127.0.0.1:3002/session".to_string()
}

fn default_auth_dir() -> String {
    "auth_state".to_string()
}

fn default_device_name() -> String {
    "Zapgate".to_string()
}

fn default_reconnect_delay_secs() -> u64 {
    5
}

fn default_bad_session_delay_secs() -> u64 {
    3
}

/// Reasoning backend HTTP configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL of the reasoning backend.
    #[serde(default = "default_backend_base_url")]
    pub base_url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_backend_timeout_secs")]
    pub timeout_secs: u64,

    /// Interval of the periodic status resend, in seconds.
    #[serde(default = "default_status_interval_secs")]
    pub status_interval_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_base_url(),
            timeout_secs: default_backend_timeout_secs(),
            status_interval_secs: default_status_interval_secs(),
        }
    }
}

fn default_backend_base_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_backend_timeout_secs() -> u64 {
    5
}

fn default_status_interval_secs() -> u64 {
    5
}

/// Relay pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Ceiling of the message-id dedup cache; the oldest half is evicted
    /// when exceeded.
    #[serde(default = "default_dedup_capacity")]
    pub dedup_capacity: usize,

    /// Lower bound of the humanized reply delay, in milliseconds
    /// (inclusive).
    #[serde(default = "default_reply_delay_min_ms")]
    pub reply_delay_min_ms: u64,

    /// Upper bound of the humanized reply delay, in milliseconds
    /// (exclusive).
    #[serde(default = "default_reply_delay_max_ms")]
    pub reply_delay_max_ms: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            dedup_capacity: default_dedup_capacity(),
            reply_delay_min_ms: default_reply_delay_min_ms(),
            reply_delay_max_ms: default_reply_delay_max_ms(),
        }
    }
}

fn default_dedup_capacity() -> usize {
    1000
}

fn default_reply_delay_min_ms() -> u64 {
    1500
}

fn default_reply_delay_max_ms() -> u64 {
    3000
}

/// Local observability endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WebConfig {
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_web_port")]
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
        }
    }
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    3001
}
