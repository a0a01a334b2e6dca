//! Project handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use super::{ErrorResponse, HandlerError, backend_error};
use crate::api::AppState;
use crate::backend::{EntityKind, IssueBackend, NamedEntity, Project};
use crate::service;

/// List all projects
///
/// Returns every project visible to the API key
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "projects",
    responses(
        (status = 200, description = "List of projects", body = Vec<Project>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_projects<B: IssueBackend>(
    State(state): State<AppState<B>>,
) -> Result<Json<Vec<Project>>, HandlerError> {
    service::list_projects(state.backend())
        .await
        .map(Json)
        .map_err(backend_error)
}

/// Get a project by key
#[utoipa::path(
    get,
    path = "/api/v1/projects/{key}",
    tag = "projects",
    params(
        ("key" = String, Path, description = "Project key or numeric ID")
    ),
    responses(
        (status = 200, description = "Project found", body = Project),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_project<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Path(key): Path<String>,
) -> Result<Json<Project>, HandlerError> {
    service::get_project(state.backend(), &key)
        .await
        .map(Json)
        .map_err(backend_error)
}

async fn project_lookup<B: IssueBackend>(
    state: &AppState<B>,
    kind: EntityKind,
    key: &str,
) -> Result<Json<Vec<NamedEntity>>, HandlerError> {
    service::list_project_lookup(state.backend(), kind, key)
        .await
        .map(Json)
        .map_err(backend_error)
}

/// List project statuses
#[utoipa::path(
    get,
    path = "/api/v1/projects/{key}/statuses",
    tag = "projects",
    params(("key" = String, Path, description = "Project key or numeric ID")),
    responses(
        (status = 200, description = "Statuses", body = Vec<NamedEntity>),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_project_statuses<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Path(key): Path<String>,
) -> Result<Json<Vec<NamedEntity>>, HandlerError> {
    project_lookup(&state, EntityKind::Status, &key).await
}

/// List project issue types
#[utoipa::path(
    get,
    path = "/api/v1/projects/{key}/issue-types",
    tag = "projects",
    params(("key" = String, Path, description = "Project key or numeric ID")),
    responses(
        (status = 200, description = "Issue types", body = Vec<NamedEntity>),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_project_issue_types<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Path(key): Path<String>,
) -> Result<Json<Vec<NamedEntity>>, HandlerError> {
    project_lookup(&state, EntityKind::IssueType, &key).await
}

/// List project categories
#[utoipa::path(
    get,
    path = "/api/v1/projects/{key}/categories",
    tag = "projects",
    params(("key" = String, Path, description = "Project key or numeric ID")),
    responses(
        (status = 200, description = "Categories", body = Vec<NamedEntity>),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_project_categories<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Path(key): Path<String>,
) -> Result<Json<Vec<NamedEntity>>, HandlerError> {
    project_lookup(&state, EntityKind::Category, &key).await
}

/// List project milestones
#[utoipa::path(
    get,
    path = "/api/v1/projects/{key}/milestones",
    tag = "projects",
    params(("key" = String, Path, description = "Project key or numeric ID")),
    responses(
        (status = 200, description = "Milestones", body = Vec<NamedEntity>),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_project_milestones<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Path(key): Path<String>,
) -> Result<Json<Vec<NamedEntity>>, HandlerError> {
    project_lookup(&state, EntityKind::Milestone, &key).await
}

/// List project versions
#[utoipa::path(
    get,
    path = "/api/v1/projects/{key}/versions",
    tag = "projects",
    params(("key" = String, Path, description = "Project key or numeric ID")),
    responses(
        (status = 200, description = "Versions", body = Vec<NamedEntity>),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_project_versions<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Path(key): Path<String>,
) -> Result<Json<Vec<NamedEntity>>, HandlerError> {
    project_lookup(&state, EntityKind::Version, &key).await
}
