// src/logging.rs

//! Diagnostics for `dyncomp` go to stderr through `tracing`.
//!
//! Stdout belongs to the banner and the command's own output, so nothing
//! here ever writes there. The level is picked from `--log-level`, then
//! `DYNCOMP_LOG`, then `warn`.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Environment variable consulted when `--log-level` is absent.
pub const LOG_ENV_VAR: &str = "DYNCOMP_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_level = std::env::var(LOG_ENV_VAR).ok();

    fmt()
        .with_max_level(select_level(cli_level, env_level.as_deref()))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("initialising logging: {e}"))?;

    Ok(())
}

/// Flag beats environment; an unparsable environment value is ignored.
pub fn select_level(cli_level: Option<LogLevel>, env_value: Option<&str>) -> Level {
    cli_level
        .map(Level::from)
        .or_else(|| env_value.and_then(|v| v.trim().parse().ok()))
        .unwrap_or(Level::WARN)
}
