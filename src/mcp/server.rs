//! Line-delimited JSON-RPC tool server.

use std::sync::Arc;
use std::time::Instant;

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::dispatch::dispatch;

use super::protocol::{JSONRPC_VERSION, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use super::tools::{CallToolParams, CallToolResult, list_tools};

/// Protocol revision announced in `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name announced in `initialize`.
pub const SERVER_NAME: &str = "calculadora-laboral";

/// Serves both calculators as tools over newline-delimited JSON-RPC.
#[derive(Debug, Clone)]
pub struct McpServer {
    config: Arc<ConfigLoader>,
}

impl McpServer {
    /// Creates a server reading statutory amounts from `config`.
    pub fn new(config: Arc<ConfigLoader>) -> Self {
        Self { config }
    }

    /// Handles one request. Notifications produce no response.
    pub fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, "Handling JSON-RPC message");
        let notification = request.is_notification();

        let outcome = if request.jsonrpc != JSONRPC_VERSION {
            Err(JsonRpcError::invalid_request(format!(
                "Unsupported jsonrpc version '{}'",
                request.jsonrpc
            )))
        } else {
            match request.method.as_str() {
                "initialize" => Ok(self.initialize()),
                "ping" => Ok(json!({})),
                "tools/list" => Ok(json!({ "tools": list_tools() })),
                "tools/call" => self.call_tool(request.params),
                method if method.starts_with("notifications/") => Ok(Value::Null),
                method => Err(JsonRpcError::method_not_found(method)),
            }
        };

        if notification {
            if let Err(error) = outcome {
                debug!(code = error.code, "Dropping error for notification");
            }
            return None;
        }

        let id = request.id.unwrap_or(Value::Null);
        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    /// Handles one line of input and returns the serialized reply, if any.
    pub fn handle_line(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let response = match serde_json::from_str::<Value>(line) {
            Err(err) => {
                warn!(error = %err, "Unparseable JSON-RPC message");
                Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::parse_error(format!("Parse error: {}", err)),
                ))
            }
            Ok(value) => {
                let id = value.get("id").cloned().unwrap_or(Value::Null);
                match serde_json::from_value::<JsonRpcRequest>(value) {
                    Ok(request) => self.handle(request),
                    Err(err) => Some(JsonRpcResponse::failure(
                        id,
                        JsonRpcError::invalid_request(format!("Invalid request: {}", err)),
                    )),
                }
            }
        };

        response.and_then(|response| serde_json::to_string(&response).ok())
    }

    /// Serves requests from `reader` until end of input, writing one reply
    /// line per request to `writer`.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(
            server = SERVER_NAME,
            protocol = PROTOCOL_VERSION,
            "Tool server listening"
        );

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if let Some(reply) = self.handle_line(&line) {
                writer.write_all(reply.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, tool server stopping");
        Ok(())
    }

    fn initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
        })
    }

    fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(|err| JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", err)))?;

        let correlation_id = Uuid::new_v4();
        info!(
            correlation_id = %correlation_id,
            tool = %params.name,
            "Processing tool call"
        );

        let start_time = Instant::now();
        let output = dispatch(&params.name, params.arguments, &self.config).map_err(|err| {
            warn!(
                correlation_id = %correlation_id,
                tool = %params.name,
                error = %err,
                "Tool call failed"
            );
            JsonRpcError::from(err)
        })?;

        let text = serde_json::to_string(&output)
            .map_err(|err| JsonRpcError::internal_error(err.to_string()))?;
        info!(
            correlation_id = %correlation_id,
            tool = %params.name,
            duration_us = start_time.elapsed().as_micros(),
            "Tool call completed successfully"
        );

        serde_json::to_value(CallToolResult::text(text))
            .map_err(|err| JsonRpcError::internal_error(err.to_string()))
    }
}
