//! Entry point for starting a client/server session.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

use tracing::debug;

use crate::connection::{self, CONNECTION_TARGET};
use crate::handle::{ClientHandle, ClientPhase};
use crate::session::SessionDescriptor;

/// A configured language client, ready to start its session.
#[derive(Debug, Clone)]
pub struct LanguageClient {
    name: String,
    descriptor: SessionDescriptor,
}

impl LanguageClient {
    /// Pairs a display name with the session to run.
    #[must_use]
    pub fn new(name: impl Into<String>, descriptor: SessionDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
        }
    }

    /// Starts the session and returns its disposable handle.
    ///
    /// Returns immediately: process spawn and the protocol handshake run on a
    /// background worker, and any startup failure is logged and parked in the
    /// handle's phase instead of being raised here.
    #[must_use]
    pub fn start(self) -> ClientHandle {
        let Self { name, descriptor } = self;

        let phase = Arc::new(Mutex::new(ClientPhase::Starting));
        let (commands, command_queue) = mpsc::channel();
        let selector = descriptor.selector().clone();
        let sync_file_events = descriptor.sync_file_events();

        debug!(
            target: CONNECTION_TARGET,
            client = %name,
            "starting language server session"
        );

        let worker = {
            let name = name.clone();
            let phase = Arc::clone(&phase);
            let executable = descriptor.executable().clone();
            thread::spawn(move || connection::run(&name, &executable, &phase, &command_queue))
        };

        ClientHandle::new(name, selector, sync_file_events, phase, commands, worker)
    }
}
