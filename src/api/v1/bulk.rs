//! Bulk operation handlers.
//!
//! Every bulk route answers 200 with a [`BulkResult`], even when every item
//! failed. A request missing its mutation field never reaches the runner.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;
use utoipa::ToSchema;

use super::ErrorResponse;
use crate::api::AppState;
use crate::backend::IssueBackend;
use crate::service::{self, BulkResult, Mutation};

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkStatusRequest {
    #[schema(example = json!(["TEST-1", "TEST-2"]))]
    pub issue_ids: Vec<String>,
    #[schema(example = 2)]
    pub status_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkAssigneeRequest {
    #[schema(example = json!(["TEST-1", "TEST-2"]))]
    pub issue_ids: Vec<String>,
    pub assignee_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkPriorityRequest {
    #[schema(example = json!(["TEST-1", "TEST-2"]))]
    pub issue_ids: Vec<String>,
    #[schema(example = 3)]
    pub priority_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkMilestoneRequest {
    #[schema(example = json!(["TEST-1", "TEST-2"]))]
    pub issue_ids: Vec<String>,
    pub milestone_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkCategoryRequest {
    #[schema(example = json!(["TEST-1", "TEST-2"]))]
    pub issue_ids: Vec<String>,
    pub category_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkDeleteRequest {
    #[schema(example = json!(["TEST-1", "TEST-2"]))]
    pub issue_ids: Vec<String>,
}

/// Bulk update issue status
#[utoipa::path(
    post,
    path = "/api/v1/bulk/status",
    tag = "bulk",
    request_body = BulkStatusRequest,
    responses(
        (status = 200, description = "Per-item outcome report", body = BulkResult),
        (status = 403, description = "Read-only mode", body = ErrorResponse),
        (status = 422, description = "Malformed request")
    )
)]
#[instrument(skip(state, req), fields(items = req.issue_ids.len()))]
pub async fn bulk_update_status<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Json(req): Json<BulkStatusRequest>,
) -> Json<BulkResult> {
    let mutation = Mutation::Status(req.status_id);
    Json(service::apply_bulk(state.backend(), &req.issue_ids, mutation).await)
}

/// Bulk update issue assignee
#[utoipa::path(
    post,
    path = "/api/v1/bulk/assignee",
    tag = "bulk",
    request_body = BulkAssigneeRequest,
    responses(
        (status = 200, description = "Per-item outcome report", body = BulkResult),
        (status = 403, description = "Read-only mode", body = ErrorResponse),
        (status = 422, description = "Malformed request")
    )
)]
#[instrument(skip(state, req), fields(items = req.issue_ids.len()))]
pub async fn bulk_update_assignee<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Json(req): Json<BulkAssigneeRequest>,
) -> Json<BulkResult> {
    let mutation = Mutation::Assignee(req.assignee_id);
    Json(service::apply_bulk(state.backend(), &req.issue_ids, mutation).await)
}

/// Bulk update issue priority
#[utoipa::path(
    post,
    path = "/api/v1/bulk/priority",
    tag = "bulk",
    request_body = BulkPriorityRequest,
    responses(
        (status = 200, description = "Per-item outcome report", body = BulkResult),
        (status = 403, description = "Read-only mode", body = ErrorResponse),
        (status = 422, description = "Malformed request")
    )
)]
#[instrument(skip(state, req), fields(items = req.issue_ids.len()))]
pub async fn bulk_update_priority<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Json(req): Json<BulkPriorityRequest>,
) -> Json<BulkResult> {
    let mutation = Mutation::Priority(req.priority_id);
    Json(service::apply_bulk(state.backend(), &req.issue_ids, mutation).await)
}

/// Bulk set issue milestone
#[utoipa::path(
    post,
    path = "/api/v1/bulk/milestone",
    tag = "bulk",
    request_body = BulkMilestoneRequest,
    responses(
        (status = 200, description = "Per-item outcome report", body = BulkResult),
        (status = 403, description = "Read-only mode", body = ErrorResponse),
        (status = 422, description = "Malformed request")
    )
)]
#[instrument(skip(state, req), fields(items = req.issue_ids.len()))]
pub async fn bulk_update_milestone<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Json(req): Json<BulkMilestoneRequest>,
) -> Json<BulkResult> {
    let mutation = Mutation::Milestone(req.milestone_id);
    Json(service::apply_bulk(state.backend(), &req.issue_ids, mutation).await)
}

/// Bulk set issue category
#[utoipa::path(
    post,
    path = "/api/v1/bulk/category",
    tag = "bulk",
    request_body = BulkCategoryRequest,
    responses(
        (status = 200, description = "Per-item outcome report", body = BulkResult),
        (status = 403, description = "Read-only mode", body = ErrorResponse),
        (status = 422, description = "Malformed request")
    )
)]
#[instrument(skip(state, req), fields(items = req.issue_ids.len()))]
pub async fn bulk_update_category<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Json(req): Json<BulkCategoryRequest>,
) -> Json<BulkResult> {
    let mutation = Mutation::Category(req.category_id);
    Json(service::apply_bulk(state.backend(), &req.issue_ids, mutation).await)
}

/// Bulk delete issues
#[utoipa::path(
    post,
    path = "/api/v1/bulk/delete",
    tag = "bulk",
    request_body = BulkDeleteRequest,
    responses(
        (status = 200, description = "Per-item outcome report", body = BulkResult),
        (status = 403, description = "Read-only mode", body = ErrorResponse),
        (status = 422, description = "Malformed request")
    )
)]
#[instrument(skip(state, req), fields(items = req.issue_ids.len()))]
pub async fn bulk_delete_issues<B: IssueBackend>(
    State(state): State<AppState<B>>,
    Json(req): Json<BulkDeleteRequest>,
) -> Json<BulkResult> {
    Json(service::apply_bulk(state.backend(), &req.issue_ids, Mutation::Delete).await)
}
