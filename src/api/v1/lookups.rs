//! Space-wide lookup handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use super::{ErrorResponse, HandlerError, backend_error};
use crate::api::AppState;
use crate::backend::{IssueBackend, NamedEntity, User};
use crate::service;

/// List users in the space
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "lookups",
    responses(
        (status = 200, description = "Users", body = Vec<User>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_users<B: IssueBackend>(
    State(state): State<AppState<B>>,
) -> Result<Json<Vec<User>>, HandlerError> {
    service::list_users(state.backend())
        .await
        .map(Json)
        .map_err(backend_error)
}

/// List priorities
#[utoipa::path(
    get,
    path = "/api/v1/priorities",
    tag = "lookups",
    responses(
        (status = 200, description = "Priorities", body = Vec<NamedEntity>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_priorities<B: IssueBackend>(
    State(state): State<AppState<B>>,
) -> Result<Json<Vec<NamedEntity>>, HandlerError> {
    service::list_priorities(state.backend())
        .await
        .map(Json)
        .map_err(backend_error)
}
