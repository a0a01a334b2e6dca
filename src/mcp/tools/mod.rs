//! MCP tool implementations
//!
//! Tools are grouped by concern, one `#[tool_router]` block per module, and
//! combined into a single router on [`McpServer`](crate::mcp::McpServer).

pub mod bulk;
pub mod issues;
pub mod projects;


use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;
use serde_json::json;

use crate::api::READ_ONLY_MESSAGE;
use crate::backend::BackendError;

/// Map a backend error onto an MCP error.
pub(crate) fn map_backend_error(e: BackendError) -> McpError {
    let data = Some(json!({"error": e.to_string()}));
    match e {
        BackendError::NotFound { .. } => McpError::resource_not_found(e.to_string(), data),
        BackendError::Validation { message } => McpError::invalid_params(message, data),
        _ => McpError::internal_error(e.to_string(), data),
    }
}

pub(crate) fn read_only_error() -> McpError {
    McpError::invalid_request(READ_ONLY_MESSAGE, None)
}

/// Serialize `value` as pretty JSON text content.
pub(crate) fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let content = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(
            "serialization_error",
            Some(json!({"error": e.to_string()})),
        )
    })?;

    Ok(CallToolResult::success(vec![Content::text(content)]))
}
