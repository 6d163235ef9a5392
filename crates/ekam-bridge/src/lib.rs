//! Host-facing activation layer for the Ekam language server bridge.
#![deny(missing_docs)]
//!
//! The embedding host builds an [`ExtensionContext`] from its settings
//! snapshot, calls [`activate`] once, and later releases everything the
//! activation registered by disposing the context. Reading the `ekam`
//! settings section, describing the session, and starting the client all
//! happen here, while process management lives in `ekam-bridge-client` and
//! failure reporting stays in the log.

mod activate;
mod host;
mod launcher;
mod logging;

pub use activate::{activate, activate_with_launcher};
pub use host::{Disposable, ExtensionContext};
pub use launcher::{CLIENT_DISPLAY_NAME, ProcessLauncher, SessionLauncher};
pub use logging::{LoggingInitError, init_logging};
