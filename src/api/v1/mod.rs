//! V1 API handlers.

mod bulk;
mod issues;
mod lookups;
mod projects;
mod system;

#[cfg(test)]
mod projects_test;
#[cfg(test)]
mod test_support;

pub use bulk::*;
pub use issues::*;
pub use lookups::*;
pub use projects::*;
pub use system::*;

use axum::{Json, http::StatusCode};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::backend::BackendError;

/// Error response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Entity not found: issue 'TEST-1'")]
    pub error: String,
}

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Map a backend error onto a status code and JSON body.
pub(crate) fn backend_error(e: BackendError) -> HandlerError {
    let status = match &e {
        BackendError::NotFound { .. } => StatusCode::NOT_FOUND,
        BackendError::Validation { .. } => StatusCode::BAD_REQUEST,
        _ => {
            error!(error = %e, "backend call failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

pub(crate) fn bad_request(message: impl Into<String>) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}
