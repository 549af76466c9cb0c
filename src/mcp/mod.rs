//! Model Context Protocol tool server.
//!
//! Exposes `calcular_incapacidad` and `calcular_indemnizacion` as tools over
//! newline-delimited JSON-RPC 2.0, normally on stdin/stdout.

mod protocol;
mod server;
mod tools;

pub use protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR,
};
pub use server::{McpServer, PROTOCOL_VERSION, SERVER_NAME};
pub use tools::{CallToolParams, CallToolResult, ToolContent, ToolDefinition, list_tools, tool_definition};
