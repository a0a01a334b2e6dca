//! Issue and comment handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use super::{ErrorResponse, HandlerError, backend_error, bad_request};
use crate::api::AppState;
use crate::backend::{Comment, Issue, IssueBackend, IssueQuery};
use crate::service::{self, CreateIssueInput, UpdateIssueInput, clamp_count};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListIssuesQuery {
    /// Filter by project ID
    #[param(example = 1)]
    pub project_id: Option<i64>,
    /// Comma-separated status IDs
    #[param(example = "1,2")]
    pub status_id: Option<String>,
    /// Filter by assignee user ID
    pub assignee_id: Option<i64>,
    /// Keyword search over summary and description
    pub keyword: Option<String>,
    /// Number of issues to return (1-100, default 20)
    #[param(example = 20)]
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CountQuery {
    /// Number of items to return (1-100, default 20)
    #[param(example = 20)]
    pub count: Option<usize>,
}

/// Create issue request DTO
///
/// Name fields are used only when the matching ID field is absent.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateIssueRequest {
    #[schema(example = 1)]
    pub project_id: Option<i64>,
    /// Used when `project_id` is absent
    #[schema(example = "TEST")]
    pub project_key: Option<String>,
    #[schema(example = "Login fails on Safari")]
    pub summary: String,
    pub description: Option<String>,
    pub issue_type_id: Option<i64>,
    #[schema(example = "Bug")]
    pub issue_type_name: Option<String>,
    pub priority_id: Option<i64>,
    #[schema(example = "中")]
    pub priority_name: Option<String>,
    pub assignee_id: Option<i64>,
    pub assignee_name: Option<String>,
    pub category_id: Option<Vec<i64>>,
    pub category_name: Option<Vec<String>>,
    pub milestone_id: Option<Vec<i64>>,
    pub milestone_name: Option<Vec<String>>,
    pub version_id: Option<Vec<i64>>,
    pub version_name: Option<Vec<String>>,
    /// yyyy-MM-dd
    #[schema(example = "2025-01-01")]
    pub start_date: Option<String>,
    /// yyyy-MM-dd
    #[schema(example = "2025-01-31")]
    pub due_date: Option<String>,
}

impl From<CreateIssueRequest> for CreateIssueInput {
    fn from(r: CreateIssueRequest) -> Self {
        Self {
            project_id: r.project_id,
            project_key: r.project_key,
            summary: r.summary,
            description: r.description,
            issue_type_id: r.issue_type_id,
            issue_type_name: r.issue_type_name,
            priority_id: r.priority_id,
            priority_name: r.priority_name,
            assignee_id: r.assignee_id,
            assignee_name: r.assignee_name,
            category_id: r.category_id,
            category_name: r.category_name,
            milestone_id: r.milestone_id,
            milestone_name: r.milestone_name,
            version_id: r.version_id,
            version_name: r.version_name,
            start_date: r.start_date,
            due_date: r.due_date,
        }
    }
}

/// Update issue request DTO
///
/// Only the fields present are changed.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateIssueRequest {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub status_id: Option<i64>,
    #[schema(example = "In Progress")]
    pub status_name: Option<String>,
    pub priority_id: Option<i64>,
    pub priority_name: Option<String>,
    pub assignee_id: Option<i64>,
    pub assignee_name: Option<String>,
    pub category_id: Option<Vec<i64>>,
    pub category_name: Option<Vec<String>>,
    pub milestone_id: Option<Vec<i64>>,
    pub milestone_name: Option<Vec<String>>,
    pub version_id: Option<Vec<i64>>,
    pub version_name: Option<Vec<String>>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
}

impl From<UpdateIssueRequest> for UpdateIssueInput {
    fn from(r: UpdateIssueRequest) -> Self {
        Self {
            summary: r.summary,
            description: r.description,
            status_id: r.status_id,
            status_name: r.status_name,
            priority_id: r.priority_id,
            priority_name: r.priority_name,
            assignee_id: r.assignee_id,
            assignee_name: r.assignee_name,
            category_id: r.category_id,
            category_name: r.category_name,
            milestone_id: r.milestone_id,
            milestone_name: r.milestone_name,
            version_id: r.version_id,
            version_name: r.version_name,
            start_date: r.start_date,
            due_date: r.due_date,
        }
    }
}

/// Add comment request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentRequest {
    #[schema(example = "Reproduced on staging")]
    pub content: String,
}

fn parse_ids(raw: &str) -> Result<Vec<i64>, HandlerError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| bad_request(format!("Invalid status_id '{}'", s)))
        })
        .collect()
}

// =============================================================================
// Handlers
// =============================================================================

/// List issues
///
/// Returns issues matching the optional filters
#[utoipa::path(
    get,
    path = "/api/v1/issues",
    tag = "issues",
    params(ListIssuesQuery),
    responses(
        (status = 200, description = "List of issues", body = Vec<Issue>),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_issues<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Query(query): Query<ListIssuesQuery>,
) -> Result<Json<Vec<Issue>>, HandlerError> {
    let status_ids = match query.status_id.as_deref() {
        Some(raw) => parse_ids(raw)?,
        None => Vec::new(),
    };

    let issue_query = IssueQuery {
        project_id: query.project_id,
        status_ids,
        assignee_id: query.assignee_id,
        keyword: query.keyword,
        count: clamp_count(query.count),
    };

    service::list_issues(state.backend(), issue_query)
        .await
        .map(Json)
        .map_err(backend_error)
}

/// Get an issue by ID or key
#[utoipa::path(
    get,
    path = "/api/v1/issues/{id_or_key}",
    tag = "issues",
    params(("id_or_key" = String, Path, description = "Issue ID or key, e.g. TEST-1")),
    responses(
        (status = 200, description = "Issue found", body = Issue),
        (status = 404, description = "Issue not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_issue<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Path(id_or_key): Path<String>,
) -> Result<Json<Issue>, HandlerError> {
    service::get_issue(state.backend(), &id_or_key)
        .await
        .map(Json)
        .map_err(backend_error)
}

/// Create an issue
///
/// Name fields (priority, assignee, categories, ...) are resolved to IDs
/// within the target project; unknown names are ignored.
#[utoipa::path(
    post,
    path = "/api/v1/issues",
    tag = "issues",
    request_body = CreateIssueRequest,
    responses(
        (status = 201, description = "Issue created", body = Issue),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Read-only mode", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, req))]
pub async fn create_issue<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Json(req): Json<CreateIssueRequest>,
) -> Result<(StatusCode, Json<Issue>), HandlerError> {
    let issue = service::create_issue(state.backend(), req.into())
        .await
        .map_err(backend_error)?;
    Ok((StatusCode::CREATED, Json(issue)))
}

/// Update an issue
#[utoipa::path(
    patch,
    path = "/api/v1/issues/{id_or_key}",
    tag = "issues",
    params(("id_or_key" = String, Path, description = "Issue ID or key")),
    request_body = UpdateIssueRequest,
    responses(
        (status = 200, description = "Issue updated", body = Issue),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Read-only mode", body = ErrorResponse),
        (status = 404, description = "Issue not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, req))]
pub async fn update_issue<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Path(id_or_key): Path<String>,
    Json(req): Json<UpdateIssueRequest>,
) -> Result<Json<Issue>, HandlerError> {
    service::update_issue(state.backend(), &id_or_key, req.into())
        .await
        .map(Json)
        .map_err(backend_error)
}

/// Delete an issue
#[utoipa::path(
    delete,
    path = "/api/v1/issues/{id_or_key}",
    tag = "issues",
    params(("id_or_key" = String, Path, description = "Issue ID or key")),
    responses(
        (status = 204, description = "Issue deleted"),
        (status = 403, description = "Read-only mode", body = ErrorResponse),
        (status = 404, description = "Issue not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_issue<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Path(id_or_key): Path<String>,
) -> Result<StatusCode, HandlerError> {
    service::delete_issue(state.backend(), &id_or_key)
        .await
        .map_err(backend_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// List comments on an issue
#[utoipa::path(
    get,
    path = "/api/v1/issues/{id_or_key}/comments",
    tag = "issues",
    params(
        ("id_or_key" = String, Path, description = "Issue ID or key"),
        CountQuery
    ),
    responses(
        (status = 200, description = "Comments", body = Vec<Comment>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_issue_comments<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Path(id_or_key): Path<String>,
    Query(query): Query<CountQuery>,
) -> Result<Json<Vec<Comment>>, HandlerError> {
    service::list_comments(state.backend(), &id_or_key, query.count)
        .await
        .map(Json)
        .map_err(backend_error)
}

/// Add a comment to an issue
#[utoipa::path(
    post,
    path = "/api/v1/issues/{id_or_key}/comments",
    tag = "issues",
    params(("id_or_key" = String, Path, description = "Issue ID or key")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment added", body = Comment),
        (status = 400, description = "Empty content", body = ErrorResponse),
        (status = 403, description = "Read-only mode", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, req))]
pub async fn add_issue_comment<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Path(id_or_key): Path<String>,
    Json(req): Json<CommentRequest>,
) -> Result<(StatusCode, Json<Comment>), HandlerError> {
    let comment = service::add_comment(state.backend(), &id_or_key, &req.content)
        .await
        .map_err(backend_error)?;
    Ok((StatusCode::CREATED, Json(comment)))
}
