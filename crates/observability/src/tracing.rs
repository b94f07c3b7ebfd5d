//! Tracing/logging initialization.
//!
//! JSON (or pretty) logs with system timestamps, filtered by an `EnvFilter`.

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::SystemTime;

use crate::config::{LogConfig, LogFormat};

/// Install the global subscriber described by `config`.
///
/// Fails if the filter directives are invalid or a global subscriber is
/// already installed.
pub fn try_init(config: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("invalid log filter: {}", config.filter))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(SystemTime)
        .with_target(false);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    ::tracing::debug!(filter = %config.filter, format = %config.format, "tracing initialized");
    Ok(())
}
