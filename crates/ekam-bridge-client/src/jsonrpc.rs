//! JSON-RPC 2.0 codec for the language server channel.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request originated by this client.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: i64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub(crate) fn new(id: i64, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: method.into(),
            params,
        }
    }
}

/// A notification originated by this client (no response expected).
#[derive(Debug, Clone, Serialize)]
pub(crate) struct JsonRpcNotification {
    pub jsonrpc: &'static str,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcNotification {
    pub(crate) fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            method: method.into(),
            params,
        }
    }
}

/// A response received from the server.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct JsonRpcResponse {
    #[expect(dead_code, reason = "wire field the client does not inspect")]
    pub jsonrpc: String,
    pub id: Option<i64>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// A JSON-RPC error object attached to a failed response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    #[expect(dead_code, reason = "wire field the client does not inspect")]
    pub data: Option<Value>,
}

/// Any message the server can emit on its side of the channel.
#[derive(Debug)]
pub(crate) enum JsonRpcMessage {
    /// Reply to one of this client's requests.
    Response(JsonRpcResponse),
    /// Server-initiated request that expects an answer.
    ServerRequest { id: i64, method: String },
    /// Server-initiated notification.
    Notification { method: String },
}

impl JsonRpcMessage {
    /// Classifies one raw frame into a response, request, or notification.
    pub(crate) fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(bytes)?;

        // A method field marks server-originated traffic; everything else is
        // a reply to one of our requests.
        if let Some(method) = value.get("method").and_then(Value::as_str) {
            let method = method.to_string();
            return Ok(match value.get("id").and_then(Value::as_i64) {
                Some(id) => Self::ServerRequest { id, method },
                None => Self::Notification { method },
            });
        }

        serde_json::from_value(value).map(Self::Response)
    }
}
