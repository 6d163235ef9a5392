//! Seam between activation and the language client.

use ekam_bridge_client::{ClientHandle, LanguageClient, SessionDescriptor};

use crate::host::Disposable;

/// Display name attached to the bridge's client session.
pub const CLIENT_DISPLAY_NAME: &str = "Ekam Language Server";

/// Starts client sessions on behalf of the activation entry point.
///
/// The trait exists so tests can observe the descriptor a launch received
/// without spawning a real server process.
pub trait SessionLauncher {
    /// Starts a session and returns its disposable handle.
    fn launch(&self, descriptor: SessionDescriptor) -> Box<dyn Disposable>;
}

/// Launches real server processes through [`LanguageClient`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl SessionLauncher for ProcessLauncher {
    fn launch(&self, descriptor: SessionDescriptor) -> Box<dyn Disposable> {
        Box::new(LanguageClient::new(CLIENT_DISPLAY_NAME, descriptor).start())
    }
}

impl Disposable for ClientHandle {
    fn dispose(&mut self) {
        ClientHandle::dispose(self);
    }
}
