// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Zapgate - a WhatsApp-session-to-AI-backend bridge daemon.
//!
//! This is the binary entry point for the bridge.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod serve;

/// Zapgate - bridge a QR-paired messaging session to a reasoning backend.
#[derive(Parser, Debug)]
#[command(name = "zapgate", version, about, long_about = None)]
struct Cli {
    /// Path to an explicit config file (skips the XDG hierarchy).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the bridge daemon (default).
    Serve,
    /// Print the resolved configuration and exit.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => zapgate_config::load_config_from_path(path),
        None => zapgate_config::load_config(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("zapgate: invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(errors) = zapgate_config::validate_config(&config) {
        for error in &errors {
            eprintln!("zapgate: {error}");
        }
        std::process::exit(1);
    }

    match cli.command {
        Some(Commands::Config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                eprintln!("zapgate: failed to render configuration: {e}");
                std::process::exit(1);
            }
        },
        Some(Commands::Serve) | None => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("zapgate: fatal: {e}");
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn default_config_passes_validation() {
        let config = zapgate_config::ZapgateConfig::default();
        assert!(zapgate_config::validate_config(&config).is_ok());
    }
}
