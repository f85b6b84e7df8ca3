//! Tracing subscriber setup for the binary.

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogFormat};

/// Environment variable holding an `EnvFilter` directive for themer.
pub const LOG_ENV: &str = "THEMER_LOG";

/// Build the event filter: `THEMER_LOG`, then `RUST_LOG`, then the
/// verbosity from `config`.
pub fn filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive()))
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for CSS and JSON output.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(config: &Config) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(config))
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match config.log_format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
