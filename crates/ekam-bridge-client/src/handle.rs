//! Disposable handle for a running client session.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use lsp_types::FileEvent;
use tracing::{debug, warn};

use crate::connection::{WorkerCommand, set_phase};
use crate::selector::DocumentSelector;

/// Tracing target for handle operations.
const HANDLE_TARGET: &str = "ekam_bridge_client::handle";

/// Where a session currently is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientPhase {
    /// The worker is spawning the process and running the handshake.
    Starting,
    /// The server is up and the channel is established.
    Running,
    /// Startup failed; the message describes why.
    Failed {
        /// Human-readable failure description.
        message: String,
    },
    /// The session has been shut down.
    Disposed,
}

/// Owns a client session from start until disposal.
///
/// The handle is the only way to reach the session: dropping it disposes the
/// connection, and disposal runs exactly once no matter how often it is
/// requested or which path releases the handle.
pub struct ClientHandle {
    name: String,
    selector: DocumentSelector,
    sync_file_events: bool,
    phase: Arc<Mutex<ClientPhase>>,
    commands: Sender<WorkerCommand>,
    worker: Option<JoinHandle<()>>,
    disposed: bool,
}

impl ClientHandle {
    pub(crate) fn new(
        name: String,
        selector: DocumentSelector,
        sync_file_events: bool,
        phase: Arc<Mutex<ClientPhase>>,
        commands: Sender<WorkerCommand>,
        worker: JoinHandle<()>,
    ) -> Self {
        Self {
            name,
            selector,
            sync_file_events,
            phase,
            commands,
            worker: Some(worker),
            disposed: false,
        }
    }

    /// Display name of the session this handle owns.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Current lifecycle phase of the session.
    #[must_use]
    pub fn phase(&self) -> ClientPhase {
        self.phase
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Whether the session reached its running state.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase() == ClientPhase::Running
    }

    /// Forwards watched-file events to the server.
    ///
    /// Events are dropped wholesale when the session disabled file-event
    /// sync, and filtered through the session's document selector otherwise.
    /// A session that is not (or no longer) running silently discards them.
    pub fn notify_file_events(&self, events: Vec<FileEvent>) {
        if !self.sync_file_events {
            debug!(
                target: HANDLE_TARGET,
                client = %self.name,
                dropped = events.len(),
                "file-event sync disabled, dropping events"
            );
            return;
        }

        let matched: Vec<FileEvent> = events
            .into_iter()
            .filter(|event| self.selector.matches(&event.uri))
            .collect();
        if matched.is_empty() {
            return;
        }

        if self.commands.send(WorkerCommand::FileEvents(matched)).is_err() {
            debug!(
                target: HANDLE_TARGET,
                client = %self.name,
                "connection worker is gone, dropping file events"
            );
        }
    }

    /// Shuts the session down.
    ///
    /// Idempotent: only the first call releases anything, later calls are
    /// no-ops. A session that already failed has nothing to release and keeps
    /// reporting [`ClientPhase::Failed`].
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        debug!(target: HANDLE_TARGET, client = %self.name, "disposing client session");
        let _ = self.commands.send(WorkerCommand::Dispose);

        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            warn!(
                target: HANDLE_TARGET,
                client = %self.name,
                "connection worker panicked during disposal"
            );
            set_phase(&self.phase, ClientPhase::Disposed);
        }
    }
}

impl Drop for ClientHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for ClientHandle {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ClientHandle")
            .field("name", &self.name)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}
