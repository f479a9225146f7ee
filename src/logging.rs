//! Tracing subscriber setup.
//!
//! `MATCH3_LOG` takes precedence over the configured level and accepts full
//! `EnvFilter` directives (e.g. `tui_match3_core=trace,info`).

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LogTarget};

pub const LOG_ENV: &str = "MATCH3_LOG";

/// Install the global subscriber for `config.log`. `LogTarget::Off` installs nothing.
pub fn init(config: &AppConfig) -> Result<()> {
    let filter = build_filter(std::env::var(LOG_ENV).ok(), &config.log_level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match &config.log {
        LogTarget::Off => Ok(()),
        LogTarget::Stderr => builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!("logging: {}", e)),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("logging: cannot open {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow!("logging: {}", e))
        }
    }
}

/// Filter from the environment directive if present, else from `level`.
pub fn build_filter(env: Option<String>, level: &str) -> Result<EnvFilter> {
    let directives = env
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| level.to_string());
    EnvFilter::try_new(&directives)
        .map_err(|e| anyhow!("logging: invalid filter {:?}: {}", directives, e))
}
