//! Default values shared across the bridge's configuration surface.

use crate::logging::LogFormat;

/// Default log filter expression used when the host provides none.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Default logging format for the bridge.
#[must_use]
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}
