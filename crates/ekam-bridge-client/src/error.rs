//! Error types for the language client.

use std::io;

use thiserror::Error;

/// Errors raised while managing the server process and its channel.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured executable does not exist.
    #[error("language server executable not found: {command}")]
    BinaryNotFound {
        /// The command that was not found.
        command: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The server process could not be started.
    #[error("failed to spawn language server: {message}")]
    SpawnFailed {
        /// Description of the spawn failure.
        message: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The framed channel to the server broke down.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// A message could not be encoded or decoded.
    #[error("JSON codec failure: {0}")]
    Codec(#[from] serde_json::Error),

    /// The server answered a request with an error object.
    #[error("server rejected {method}: {message} (code {code})")]
    Rejected {
        /// Method of the rejected request.
        method: String,
        /// JSON-RPC error code.
        code: i64,
        /// Error message reported by the server.
        message: String,
    },

    /// The server answered a request without a result payload.
    #[error("server returned an empty result for {method}")]
    EmptyResult {
        /// Method of the unanswered request.
        method: String,
    },

    /// No matching response arrived within the bounded message scan.
    #[error("no response matched request {request_id} within {scanned} messages")]
    UnansweredRequest {
        /// Identifier of the pending request.
        request_id: i64,
        /// Number of messages inspected before giving up.
        scanned: usize,
    },
}

/// Errors on the framed byte channel.
#[derive(Debug, Error)]
pub enum TransportError {
    /// I/O failure while reading or writing the channel.
    #[error("I/O failure on the server channel: {0}")]
    Io(#[from] io::Error),

    /// A frame arrived without a Content-Length header.
    #[error("message frame is missing the Content-Length header")]
    MissingContentLength,

    /// A frame header could not be parsed.
    #[error("message frame carries an unparseable header")]
    InvalidHeader,
}
