//! MCP server: JSON-RPC 2.0 message handling shared by both transports.
//!
//! [`handle_message`] takes one raw message and returns the response to send,
//! or `None` for notifications. The stdio loop and the HTTP router are thin
//! wrappers around it.

mod handlers;
mod tools;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::error::rpc_codes;
use crate::service::HiscoresService;

use handlers::{handle_initialize, handle_ping, handle_tools_list};
use tools::handle_tool_call;

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "osrs-hiscores";

/// MCP server state
pub struct McpState {
    pub service: Arc<HiscoresService>,
}

/// Full HTTP application with the MCP endpoint mounted at `mcp_path`.
///
/// An empty or `/` path mounts the endpoint at the root.
pub fn http_app(state: Arc<McpState>, mcp_path: &str) -> Router {
    let path = mcp_path.trim_matches('/');
    let router = if path.is_empty() {
        Router::new().merge(mcp_router(state))
    } else {
        Router::new().nest(&format!("/{}", path), mcp_router(state))
    };
    router.layer(TraceLayer::new_for_http())
}

/// Build the MCP router for the HTTP transport
pub fn mcp_router(state: Arc<McpState>) -> Router {
    Router::new()
        .route("/", post(mcp_message_handler))
        .with_state(state)
}

async fn mcp_message_handler(State(state): State<Arc<McpState>>, body: String) -> Response {
    match handle_message(&state, &body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Handle one raw JSON-RPC message.
///
/// Returns `None` when the message is a notification.
pub async fn handle_message(state: &McpState, raw: &str) -> Option<McpResponse> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Unparseable MCP message");
            return Some(McpResponse::error(
                Value::Null,
                McpError::new(rpc_codes::PARSE_ERROR, format!("Parse error: {}", e)),
            ));
        }
    };

    let request: McpRequest = match serde_json::from_value(value.clone()) {
        Ok(request) => request,
        Err(e) => {
            let id = value.get("id").cloned().unwrap_or(Value::Null);
            return Some(McpResponse::error(
                id,
                McpError::new(rpc_codes::INVALID_REQUEST, format!("Invalid request: {}", e)),
            ));
        }
    };

    let Some(id) = request.id else {
        debug!(method = %request.method, "MCP notification received");
        return None;
    };

    if request.jsonrpc != "2.0" {
        return Some(McpResponse::error(
            id,
            McpError::new(rpc_codes::INVALID_REQUEST, "jsonrpc must be \"2.0\""),
        ));
    }

    debug!(method = %request.method, "MCP request received");

    let result = match request.method.as_str() {
        "initialize" => handle_initialize(state).await,
        "ping" => handle_ping(state).await,
        "tools/list" => handle_tools_list(state).await,
        "tools/call" => handle_tool_call(state, request.params).await,
        _ => Err(McpError::new(
            rpc_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        )),
    };

    Some(match result {
        Ok(data) => McpResponse::result(id, data),
        Err(error) => McpResponse::error(id, error),
    })
}

// MCP Protocol Types

#[derive(Debug, Serialize, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    /// Absent for notifications
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

impl McpResponse {
    fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Value, error: McpError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl McpError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}
