//! Tracing and logging setup shared by applications embedding the customer domain.
//!
//! The domain crates only emit `tracing` events; installing a subscriber is the
//! host application's call, made once at startup through [`init`] or [`try_init`].

/// Logging configuration (filter, output format) and its environment overrides.
pub mod config;

/// Tracing subscriber installation.
pub mod tracing;

pub use config::{LogConfig, LogFormat};

/// Initialize process-wide tracing/logging from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    let _ = tracing::try_init(&LogConfig::from_env());
}

/// Initialize process-wide tracing/logging with an explicit configuration.
///
/// Fails if the filter does not parse or a global subscriber is already set.
pub fn try_init(config: &LogConfig) -> anyhow::Result<()> {
    tracing::try_init(config)
}
