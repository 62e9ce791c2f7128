//! # Telemetry
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` takes precedence
//! over the configured level.

use crate::config::{LogConfig, LogFormat};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Builds the event filter: `RUST_LOG` if set and valid, else `level`.
#[must_use]
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Installs the subscriber described by `config`.
///
/// Logs go to stderr so query output on stdout stays machine-readable.
///
/// # Errors
///
/// Returns `TryInitError` if a global subscriber is already installed.
pub fn init_tracing(config: &LogConfig) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(&config.level));
    match config.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    }
}
