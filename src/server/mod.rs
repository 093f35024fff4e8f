//! Stdio driver for the quiz engine.
//!
//! This module provides:
//! - JSON-RPC 2.0 request/response framing over line-delimited stdio
//! - Method handlers that drive one [`QuizSession`] against a shared engine
//!
//! The driver is a local harness for running a quiz interactively or from a
//! script; it holds exactly one session. Requests without an `id` are
//! notifications: they are executed but get no response line. Parse errors
//! are always answered with a null `id`.

mod handlers;

pub use handlers::*;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::engine::{QuizEngine, QuizSession};
use crate::error::{ProtocolError, ProtocolResult};

/// JSON-RPC 2.0 request structure.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version. Accepted when omitted.
    #[serde(default = "default_jsonrpc")]
    pub jsonrpc: String,
    /// Request identifier (None for notifications).
    #[serde(default)]
    pub id: Option<Value>,
    /// The method name to invoke.
    pub method: String,
    /// Optional parameters for the method.
    #[serde(default)]
    pub params: Option<Value>,
}

fn default_jsonrpc() -> String {
    "2.0".to_string()
}

/// JSON-RPC 2.0 response structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0").
    pub jsonrpc: String,
    /// Request identifier (null when the request could not be parsed).
    pub id: Value,
    /// The result on success (mutually exclusive with error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// The error on failure (mutually exclusive with result).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    /// Error code (negative for predefined errors).
    pub code: i32,
    /// Human-readable error message.
    pub message: String,
}

/// Parse error code.
pub const PARSE_ERROR: i32 = -32700;
/// Malformed request code.
pub const INVALID_REQUEST: i32 = -32600;
/// Unknown method code.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// Bad parameters code.
pub const INVALID_PARAMS: i32 = -32602;
/// Internal error code.
pub const INTERNAL_ERROR: i32 = -32603;
/// Unknown node or option index.
pub const INVALID_REFERENCE: i32 = -32000;

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.unwrap_or(Value::Null),
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.unwrap_or(Value::Null),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Error code for a protocol error.
pub fn error_code(err: &ProtocolError) -> i32 {
    match err {
        ProtocolError::InvalidRequest { .. } => INVALID_REQUEST,
        ProtocolError::UnknownMethod { .. } => METHOD_NOT_FOUND,
        ProtocolError::InvalidParameters { .. } => INVALID_PARAMS,
        ProtocolError::InvalidReference(_) => INVALID_REFERENCE,
        ProtocolError::Json(_) => INTERNAL_ERROR,
    }
}

/// Quiz driver: one session over a shared engine.
pub struct QuizServer {
    engine: Arc<QuizEngine>,
    session: QuizSession,
}

impl QuizServer {
    /// Create a driver with a fresh session.
    pub fn new(engine: Arc<QuizEngine>) -> Self {
        let session = engine.new_session();
        Self { engine, session }
    }

    /// The current session.
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Serve requests from stdin until EOF.
    pub async fn run(&mut self) -> std::io::Result<()> {
        info!("Quiz driver starting on stdio...");
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.serve(reader, writer).await
    }

    /// Serve line-delimited requests from `reader`, writing one response
    /// line per request to `writer`.
    pub async fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;

            // EOF reached
            if bytes_read == 0 {
                info!("EOF received, shutting down");
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            debug!(request = %trimmed, "Received request");

            let response = match serde_json::from_str::<JsonRpcRequest>(trimmed) {
                Ok(request) => self.handle_request(request),
                Err(e) => {
                    error!(error = %e, "Failed to parse request");
                    Some(JsonRpcResponse::error(
                        None,
                        PARSE_ERROR,
                        format!("Parse error: {}", e),
                    ))
                }
            };

            // Notifications get no response
            if let Some(response) = response {
                let response_json = serde_json::to_string(&response)?;
                debug!(response = %response_json, "Sending response");

                writer.write_all(response_json.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        Ok(())
    }

    /// Handle a single request.
    ///
    /// Returns `None` for notifications (requests without an `id`).
    pub fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let result = self.dispatch(&request.jsonrpc, &request.method, request.params);

        let Some(id) = request.id else {
            match result {
                Ok(_) => debug!(method = %request.method, "Notification handled"),
                Err(e) => debug!(method = %request.method, error = %e, "Notification failed"),
            }
            return None;
        };

        Some(match result {
            Ok(result) => JsonRpcResponse::success(Some(id), result),
            Err(e) => JsonRpcResponse::error(Some(id), error_code(&e), e.to_string()),
        })
    }

    fn dispatch(
        &mut self,
        jsonrpc: &str,
        method: &str,
        params: Option<Value>,
    ) -> ProtocolResult<Value> {
        if jsonrpc != "2.0" {
            return Err(ProtocolError::InvalidRequest {
                message: format!("Unsupported jsonrpc version: {}", jsonrpc),
            });
        }
        handle_method(&self.engine, &mut self.session, method, params)
    }
}
