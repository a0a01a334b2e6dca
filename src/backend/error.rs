//! Backend error types.
//!
//! Errors raised while talking to the issue tracker. They carry enough
//! information for the HTTP and MCP surfaces to pick a status code, and use
//! miette for diagnostic output.

use miette::Diagnostic;
use thiserror::Error;

/// Issue tracker operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum BackendError {
    #[error("Entity not found: {entity_type} '{id}'")]
    #[diagnostic(code(backlog_mcp::backend::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {message}")]
    #[diagnostic(code(backlog_mcp::backend::validation))]
    Validation { message: String },

    #[error("Backlog API error ({status}): {message}")]
    #[diagnostic(code(backlog_mcp::backend::http))]
    Http { status: u16, message: String },

    #[error("Failed to reach Backlog: {message}")]
    #[diagnostic(
        code(backlog_mcp::backend::transport),
        help("Check BACKLOG_SPACE / BACKLOG_BASE_URL and network connectivity.")
    )]
    Transport { message: String },

    #[error("Invalid response from Backlog: {message}")]
    #[diagnostic(code(backlog_mcp::backend::invalid_response))]
    InvalidResponse { message: String },
}

impl BackendError {
    pub fn not_found(entity_type: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            BackendError::InvalidResponse {
                message: e.to_string(),
            }
        } else {
            BackendError::Transport {
                message: e.to_string(),
            }
        }
    }
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
