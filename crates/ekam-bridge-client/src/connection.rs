//! Background worker owning the server process and its channel.
//!
//! The worker runs on one thread per session: it spawns the configured
//! executable, performs the `initialize` handshake, then serves commands from
//! the handle until disposal. All failures end up in the shared
//! [`ClientPhase`] and the log; the thread never panics outward.

use std::process::{Child, Command, Stdio};
use std::sync::Mutex;
use std::sync::mpsc::Receiver;
use std::thread;
use std::time::Duration;

use lsp_types::{
    ClientCapabilities, DidChangeWatchedFilesParams, FileEvent, InitializeParams, InitializeResult,
    InitializedParams,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::executable::ExecutableSpec;
use crate::handle::ClientPhase;
use crate::jsonrpc::{JsonRpcMessage, JsonRpcNotification, JsonRpcRequest};
use crate::transport::StdioTransport;

/// Tracing target for connection lifecycle events.
pub(crate) const CONNECTION_TARGET: &str = "ekam_bridge_client::connection";

/// Bound on messages scanned while waiting for a matching response.
const MAX_RESPONSE_SCAN: usize = 100;

/// Grace period between requesting shutdown and forcibly killing the server.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

/// Commands the handle sends to its connection worker.
pub(crate) enum WorkerCommand {
    /// Forward watched-file events to the server.
    FileEvents(Vec<FileEvent>),
    /// Gracefully shut the session down.
    Dispose,
}

/// Allocates request identifiers for one connection.
struct RequestIds {
    next: i64,
}

impl RequestIds {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn allocate(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Runs one session from spawn to termination.
pub(crate) fn run(
    name: &str,
    executable: &ExecutableSpec,
    phase: &Mutex<ClientPhase>,
    commands: &Receiver<WorkerCommand>,
) {
    let (mut child, mut transport) = match spawn_server(name, executable) {
        Ok(spawned) => spawned,
        Err(error) => {
            warn!(
                target: CONNECTION_TARGET,
                client = name,
                %error,
                "language server failed to start"
            );
            set_phase(phase, ClientPhase::Failed {
                message: error.to_string(),
            });
            return;
        }
    };

    let mut request_ids = RequestIds::new();
    if let Err(error) = initialize(name, &mut transport, &mut request_ids) {
        warn!(
            target: CONNECTION_TARGET,
            client = name,
            %error,
            "initialize handshake failed"
        );
        set_phase(phase, ClientPhase::Failed {
            message: error.to_string(),
        });
        terminate(name, &mut child);
        return;
    }

    set_phase(phase, ClientPhase::Running);
    serve(name, &mut transport, commands);

    shutdown(name, &mut transport, &mut request_ids);
    terminate(name, &mut child);
    set_phase(phase, ClientPhase::Disposed);
}

/// Updates the shared phase, recovering from a poisoned lock.
pub(crate) fn set_phase(phase: &Mutex<ClientPhase>, next: ClientPhase) {
    let mut guard = phase
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    *guard = next;
}

/// Spawns the server process with piped stdio.
fn spawn_server(
    name: &str,
    executable: &ExecutableSpec,
) -> Result<(Child, StdioTransport), ClientError> {
    debug!(
        target: CONNECTION_TARGET,
        client = name,
        command = %executable.command().display(),
        args = ?executable.args(),
        "spawning language server process"
    );

    let mut command = Command::new(executable.command());
    command
        .args(executable.args())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null());

    let mut child = command.spawn().map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ClientError::BinaryNotFound {
                command: executable.command().display().to_string(),
                source,
            }
        } else {
            ClientError::SpawnFailed {
                message: format!("failed to start {}", executable.command().display()),
                source,
            }
        }
    })?;

    let stdin = child.stdin.take().ok_or_else(|| ClientError::SpawnFailed {
        message: "failed to capture stdin".to_string(),
        source: std::io::Error::other("no stdin"),
    })?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| ClientError::SpawnFailed {
            message: "failed to capture stdout".to_string(),
            source: std::io::Error::other("no stdout"),
        })?;

    debug!(
        target: CONNECTION_TARGET,
        client = name,
        pid = child.id(),
        "language server process spawned"
    );

    Ok((child, StdioTransport::new(stdout, stdin)))
}

/// Runs the `initialize`/`initialized` handshake.
fn initialize(
    name: &str,
    transport: &mut StdioTransport,
    request_ids: &mut RequestIds,
) -> Result<(), ClientError> {
    let params = InitializeParams {
        process_id: Some(std::process::id()),
        capabilities: ClientCapabilities::default(),
        ..Default::default()
    };

    let result = send_request(
        transport,
        "initialize",
        Some(serde_json::to_value(params)?),
        request_ids,
    )?;
    let result: InitializeResult = serde_json::from_value(result)?;

    send_notification(transport, "initialized", Some(serde_json::to_value(InitializedParams {})?))?;

    let server = result
        .server_info
        .map_or_else(|| String::from("unnamed server"), |info| info.name);
    debug!(
        target: CONNECTION_TARGET,
        client = name,
        server = %server,
        "language server initialised"
    );
    Ok(())
}

/// Serves handle commands until disposal or handle drop.
fn serve(name: &str, transport: &mut StdioTransport, commands: &Receiver<WorkerCommand>) {
    loop {
        match commands.recv() {
            Ok(WorkerCommand::FileEvents(changes)) => {
                let params = DidChangeWatchedFilesParams { changes };
                let forwarded = serde_json::to_value(&params)
                    .map_err(ClientError::from)
                    .and_then(|params| {
                        send_notification(
                            transport,
                            "workspace/didChangeWatchedFiles",
                            Some(params),
                        )
                    });
                if let Err(error) = forwarded {
                    warn!(
                        target: CONNECTION_TARGET,
                        client = name,
                        %error,
                        "failed to forward file events"
                    );
                }
            }
            // A dropped handle behaves like an explicit disposal.
            Ok(WorkerCommand::Dispose) | Err(_) => return,
        }
    }
}

/// Requests shutdown and signals exit without awaiting a reply.
///
/// The server may exit before answering the shutdown request, so the reply is
/// deliberately not read; the grace period in [`terminate`] covers both the
/// compliant and the unresponsive case.
fn shutdown(name: &str, transport: &mut StdioTransport, request_ids: &mut RequestIds) {
    let request = JsonRpcRequest::new(request_ids.allocate(), "shutdown", None);
    let sent = serde_json::to_vec(&request)
        .map_err(ClientError::from)
        .and_then(|payload| transport.send(&payload).map_err(ClientError::from));
    if let Err(error) = sent {
        debug!(
            target: CONNECTION_TARGET,
            client = name,
            %error,
            "shutdown request failed"
        );
    }

    if let Err(error) = send_notification(transport, "exit", None) {
        debug!(
            target: CONNECTION_TARGET,
            client = name,
            %error,
            "exit notification failed"
        );
    }
}

/// Waits for the server to exit, killing it after the grace period.
fn terminate(name: &str, child: &mut Child) {
    match child.try_wait() {
        Ok(Some(status)) => {
            debug!(
                target: CONNECTION_TARGET,
                client = name,
                ?status,
                "language server exited"
            );
        }
        Ok(None) | Err(_) => {
            thread::sleep(SHUTDOWN_GRACE);
            match child.try_wait() {
                Ok(Some(status)) => {
                    debug!(
                        target: CONNECTION_TARGET,
                        client = name,
                        ?status,
                        "language server exited during grace period"
                    );
                }
                Ok(None) | Err(_) => {
                    warn!(
                        target: CONNECTION_TARGET,
                        client = name,
                        "language server did not exit, killing process"
                    );
                    let _ = child.kill();
                    let _ = child.wait();
                }
            }
        }
    }
}

/// Sends a request and returns the raw result payload.
fn send_request(
    transport: &mut StdioTransport,
    method: &str,
    params: Option<Value>,
    request_ids: &mut RequestIds,
) -> Result<Value, ClientError> {
    let request = JsonRpcRequest::new(request_ids.allocate(), method, params);
    let request_id = request.id;
    transport.send(&serde_json::to_vec(&request)?)?;

    debug!(
        target: CONNECTION_TARGET,
        method,
        id = request_id,
        "sent request"
    );

    let response = await_response(transport, request_id)?;
    if let Some(error) = response.error {
        return Err(ClientError::Rejected {
            method: method.to_string(),
            code: error.code,
            message: error.message,
        });
    }
    response.result.ok_or_else(|| ClientError::EmptyResult {
        method: method.to_string(),
    })
}

/// Sends a notification (no response expected).
fn send_notification(
    transport: &mut StdioTransport,
    method: &str,
    params: Option<Value>,
) -> Result<(), ClientError> {
    let notification = JsonRpcNotification::new(method, params);
    transport.send(&serde_json::to_vec(&notification)?)?;

    debug!(target: CONNECTION_TARGET, method, "sent notification");
    Ok(())
}

/// Scans incoming messages until the matching response arrives.
///
/// Interleaved server notifications and server-initiated requests are skipped;
/// the scan is bounded so an answer that never comes cannot block forever on
/// a chatty server.
fn await_response(
    transport: &mut StdioTransport,
    request_id: i64,
) -> Result<crate::jsonrpc::JsonRpcResponse, ClientError> {
    for _ in 0..MAX_RESPONSE_SCAN {
        let bytes = transport.receive()?;

        match JsonRpcMessage::from_bytes(&bytes)? {
            JsonRpcMessage::Response(response) => {
                if response.id == Some(request_id) {
                    return Ok(response);
                }
                warn!(
                    target: CONNECTION_TARGET,
                    expected = request_id,
                    received = ?response.id,
                    "skipping response with non-matching id"
                );
            }
            JsonRpcMessage::ServerRequest { id, method } => {
                warn!(
                    target: CONNECTION_TARGET,
                    %method,
                    id,
                    "ignoring server-initiated request"
                );
            }
            JsonRpcMessage::Notification { method } => {
                debug!(
                    target: CONNECTION_TARGET,
                    %method,
                    "skipping server notification"
                );
            }
        }
    }

    Err(ClientError::UnansweredRequest {
        request_id,
        scanned: MAX_RESPONSE_SCAN,
    })
}
