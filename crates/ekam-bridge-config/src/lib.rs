//! Configuration surface for the Ekam editor bridge.
#![deny(missing_docs)]
//!
//! The crate models the two configuration inputs the bridge consumes from its
//! embedding host: the settings snapshot the host hands over at startup
//! ([`SettingsStore`]) and the `ekam` section schema read from it
//! ([`BridgeConfig`]). Logging preferences ([`LoggingConfig`]) live here too
//! so the host integration can populate everything in one place before
//! activation runs.

mod bridge;
mod defaults;
mod logging;
mod settings;

pub use bridge::{BRIDGE_NAMESPACE, BridgeConfig};
pub use defaults::{DEFAULT_LOG_FILTER, default_log_filter_string, default_log_format};
pub use logging::{LogFormat, LogFormatParseError, LoggingConfig};
pub use settings::SettingsStore;
