//! MCP server setup and lifecycle.
//!
//! Implements a JSON-RPC based MCP server over stdio. Requests are
//! line-delimited; stdout carries only protocol frames, so all logging
//! goes to stderr.

use crate::mcp::tools::ToolRegistry;
use crate::{Error, Result};
use crate::trello::TrelloClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, BufReader, Write};
use std::sync::Arc;
use tracing::info_span;

/// MCP protocol version.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name.
const SERVER_NAME: &str = "trello-mcp";

/// Maximum request body size (1MB) to bound memory per request.
const MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024;

/// MCP server for trello-mcp.
///
/// Owns the tool registry; the Trello client is injected at construction
/// and shared read-only across tool calls.
pub struct McpServer {
    /// Tool registry.
    tools: ToolRegistry,
}

impl McpServer {
    /// Creates a new MCP server around a constructed Trello client.
    #[must_use]
    pub fn new(client: TrelloClient) -> Self {
        Self {
            tools: ToolRegistry::new(Arc::new(client)),
        }
    }

    /// Runs the server over stdio until stdin closes.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin or stdout fails.
    pub fn serve(&self) -> Result<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        let reader = BufReader::new(stdin.lock());

        for line in reader.lines() {
            let line = line.map_err(|e| Error::Transport {
                kind: "stdio".to_string(),
                cause: format!("failed to read stdin: {e}"),
            })?;

            if line.is_empty() {
                continue;
            }

            let response = self.handle_request(&line);

            writeln!(stdout, "{response}").map_err(|e| Error::Transport {
                kind: "stdio".to_string(),
                cause: format!("failed to write stdout: {e}"),
            })?;

            stdout.flush().map_err(|e| Error::Transport {
                kind: "stdio".to_string(),
                cause: format!("failed to flush stdout: {e}"),
            })?;
        }

        Ok(())
    }

    /// Handles a single JSON-RPC message, returning the serialized response.
    ///
    /// Exposed so alternative transports and tests can drive the server
    /// without a stdio pipe.
    #[must_use]
    pub fn handle_request(&self, request: &str) -> String {
        if request.len() > MAX_REQUEST_BODY_SIZE {
            tracing::warn!(
                request_size = request.len(),
                max_size = MAX_REQUEST_BODY_SIZE,
                "Request exceeds maximum size limit"
            );
            return Self::format_error(
                None,
                -32600,
                &format!(
                    "Request too large: {} bytes (max: {} bytes)",
                    request.len(),
                    MAX_REQUEST_BODY_SIZE
                ),
            );
        }

        let span = info_span!(
            "mcp.request",
            rpc.method = tracing::field::Empty,
            status = tracing::field::Empty
        );
        let _guard = span.enter();

        let parsed: std::result::Result<JsonRpcRequest, _> = serde_json::from_str(request);

        match parsed {
            Ok(req) => {
                span.record("rpc.method", req.method.as_str());
                tracing::info!(method = %req.method, "Processing MCP request");

                let result = self.dispatch_method(&req.method, req.params);
                span.record("status", if result.is_ok() { "success" } else { "error" });
                Self::format_response(req.id, result)
            },
            Err(e) => {
                span.record("status", "parse_error");
                Self::format_error(None, -32700, &format!("Parse error: {e}"))
            },
        }
    }

    /// Dispatches a method call using the command pattern.
    fn dispatch_method(&self, method: &str, params: Option<Value>) -> DispatchResult {
        use super::dispatch::McpMethod;

        match McpMethod::from(method) {
            McpMethod::Initialize => self.handle_initialize(params),
            McpMethod::ListTools => self.handle_list_tools(),
            McpMethod::CallTool => self.handle_call_tool(params),
            McpMethod::Ping => Ok(serde_json::json!({})),
            McpMethod::Unknown(name) => Err((-32601, format!("Method not found: {name}"))),
        }
    }

    /// Handles the initialize method.
    fn handle_initialize(&self, _params: Option<Value>) -> DispatchResult {
        Ok(serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        }))
    }

    /// Handles tools/list.
    fn handle_list_tools(&self) -> DispatchResult {
        let tools: Vec<Value> = self
            .tools
            .list_tools()
            .iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect();

        Ok(serde_json::json!({ "tools": tools }))
    }

    /// Handles tools/call.
    ///
    /// Handler failures become a tool result with `isError: true` rather
    /// than a JSON-RPC error; the agent sees the message and can adjust.
    fn handle_call_tool(&self, params: Option<Value>) -> DispatchResult {
        let params = params.ok_or((-32602, "Missing params".to_string()))?;

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or((-32602, "Missing tool name".to_string()))?;
        let span = info_span!("mcp.tool.call", tool.name = name);
        let _guard = span.enter();

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or(serde_json::json!({}));

        match self.tools.execute(name, &arguments) {
            Ok(result) => Ok(serde_json::json!({
                "content": result.content,
                "isError": result.is_error
            })),
            Err(e) => {
                tracing::error!(tool = name, error = %e, "Tool execution failed");
                Ok(serde_json::json!({
                    "content": [{ "type": "text", "text": format!("Error: {e}") }],
                    "isError": true
                }))
            },
        }
    }

    /// Formats a successful response.
    fn format_response(id: Option<Value>, result: DispatchResult) -> String {
        match result {
            Ok(value) => {
                let response = JsonRpcResponse {
                    jsonrpc: "2.0".to_string(),
                    id,
                    result: Some(value),
                    error: None,
                };
                serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
            },
            Err((code, message)) => Self::format_error(id, code, &message),
        }
    }

    /// Formats an error response.
    fn format_error(id: Option<Value>, code: i32, message: &str) -> String {
        let response = JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.to_string(),
                data: None,
            }),
        };
        serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Result type for method dispatch.
type DispatchResult = std::result::Result<Value, (i32, String)>;

/// JSON-RPC request.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// JSON-RPC version (required by protocol but not used in code).
    #[serde(rename = "jsonrpc")]
    _jsonrpc: String,
    id: Option<Value>,
    method: String,
    params: Option<Value>,
}

/// JSON-RPC response.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}
