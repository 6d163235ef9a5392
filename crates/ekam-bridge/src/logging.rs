//! Logging initialisation for host integrations.

use ekam_bridge_config::{DEFAULT_LOG_FILTER, LogFormat, LoggingConfig};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the global logging subscriber.
#[derive(Debug, Error)]
#[error("failed to initialise logging: {message}")]
pub struct LoggingInitError {
    message: String,
}

/// Installs a global tracing subscriber according to the host's preferences.
///
/// An unparseable filter expression falls back to the default filter rather
/// than failing, mirroring how the rest of the bridge degrades configuration
/// problems to defaults.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingInitError> {
    let filter = EnvFilter::try_new(&config.filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    installed.map_err(|source| LoggingInitError {
        message: source.to_string(),
    })
}
