// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Zapgate bridge.
//!
//! Layered TOML loading via Figment (XDG hierarchy + `ZAPGATE_` env
//! overrides), strict unknown-field rejection, and a semantic validation
//! pass over the deserialized values.

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::ZapgateConfig;
pub use validation::validate_config;
