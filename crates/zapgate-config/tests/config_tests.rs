// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Zapgate configuration system.

use zapgate_config::model::ZapgateConfig;
use zapgate_config::{load_config_from_str, validate_config};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_zapgate_config() {
    let toml = r#"
[agent]
name = "sushi-bridge"
log_level = "debug"

[transport]
sidecar_url = "ws://10.0.0.5:3002/session"
auth_dir = "/var/lib/zapgate/auth"
device_name = "Sushi Bridge"
reconnect_delay_secs = 10
bad_session_delay_secs = 2

[backend]
base_url = "http://backend:8001"
timeout_secs = 8
status_interval_secs = 15

[relay]
dedup_capacity = 500
reply_delay_min_ms = 1000
reply_delay_max_ms = 2000

[web]
host = "127.0.0.1"
port = 9090
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "sushi-bridge");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.transport.sidecar_url, "ws://10.0.0.5:3002/session");
    assert_eq!(config.transport.auth_dir, "/var/lib/zapgate/auth");
    assert_eq!(config.transport.device_name, "Sushi Bridge");
    assert_eq!(config.transport.reconnect_delay_secs, 10);
    assert_eq!(config.transport.bad_session_delay_secs, 2);
    assert_eq!(config.backend.base_url, "http://backend:8001");
    assert_eq!(config.backend.timeout_secs, 8);
    assert_eq!(config.backend.status_interval_secs, 15);
    assert_eq!(config.relay.dedup_capacity, 500);
    assert_eq!(config.relay.reply_delay_min_ms, 1000);
    assert_eq!(config.relay.reply_delay_max_ms, 2000);
    assert_eq!(config.web.host, "127.0.0.1");
    assert_eq!(config.web.port, 9090);
}

/// Unknown field in a section produces an error mentioning the bad key.
#[test]
fn unknown_field_in_transport_produces_error() {
    let toml = r#"
[transport]
sidecar_uri = "ws://127.0.0.1:3002"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("sidecar_uri"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.agent.name, "zapgate");
    assert_eq!(config.agent.log_level, "info");
    assert_eq!(config.transport.sidecar_url, "ws://127.0.0.1:3002/session");
    assert_eq!(config.transport.auth_dir, "auth_state");
    assert_eq!(config.transport.device_name, "Zapgate");
    assert_eq!(config.transport.reconnect_delay_secs, 5);
    assert_eq!(config.transport.bad_session_delay_secs, 3);
    assert_eq!(config.backend.base_url, "http://localhost:8001");
    assert_eq!(config.backend.timeout_secs, 5);
    assert_eq!(config.backend.status_interval_secs, 5);
    assert_eq!(config.relay.dedup_capacity, 1000);
    assert_eq!(config.relay.reply_delay_min_ms, 1500);
    assert_eq!(config.relay.reply_delay_max_ms, 3000);
    assert_eq!(config.web.host, "0.0.0.0");
    assert_eq!(config.web.port, 3001);
}

/// The defaults pass the semantic validation pass.
#[test]
fn defaults_validate_cleanly() {
    let config = ZapgateConfig::default();
    assert!(validate_config(&config).is_ok());
}

/// Environment variable overrides map section prefixes to dotted keys.
#[test]
fn env_var_overrides_backend_base_url() {
    use figment::providers::{Env, Serialized};
    use figment::{Figment, Jail};

    Jail::expect_with(|jail| {
        jail.set_env("ZAPGATE_BACKEND_BASE_URL", "http://other:9000");

        let config: ZapgateConfig = Figment::new()
            .merge(Serialized::defaults(ZapgateConfig::default()))
            .merge(Env::prefixed("ZAPGATE_").map(|key| {
                key.as_str().replacen("backend_", "backend.", 1).into()
            }))
            .extract()?;

        assert_eq!(config.backend.base_url, "http://other:9000");
        Ok(())
    });
}

/// Partial sections merge with defaults for the remaining keys.
#[test]
fn partial_section_keeps_defaults_for_other_keys() {
    let toml = r#"
[relay]
dedup_capacity = 200
"#;

    let config = load_config_from_str(toml).expect("partial section should merge");
    assert_eq!(config.relay.dedup_capacity, 200);
    assert_eq!(config.relay.reply_delay_min_ms, 1500);
    assert_eq!(config.relay.reply_delay_max_ms, 3000);
}
