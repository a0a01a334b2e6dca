//! Read-only mode guard for the REST routes.

use axum::{
    Json,
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use super::v1::ErrorResponse;

pub const READ_ONLY_MESSAGE: &str =
    "Application is in read-only mode. Write operations are disabled.";

fn is_write(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Reject every write method with 403 before it reaches a handler.
pub async fn reject_writes(
    State(read_only): State<bool>,
    request: Request,
    next: Next,
) -> Response {
    if read_only && is_write(request.method()) {
        warn!(method = %request.method(), path = %request.uri().path(), "write rejected in read-only mode");
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                error: READ_ONLY_MESSAGE.to_string(),
            }),
        )
            .into_response();
    }

    next.run(request).await
}
