//! Single-issue operations.
//!
//! Create and update accept display names alongside IDs. Each name field
//! supplied without its ID is resolved against the issue's project; names
//! that do not resolve are dropped from the payload instead of failing the
//! call. Dates must be `yyyy-MM-dd`.

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::backend::{
    BackendError, BackendResult, Comment, EntityKind, Issue, IssueBackend, IssueField,
    IssueFields, IssueQuery,
};
use crate::service::resolver::{resolve_all, resolve_id};

pub const DEFAULT_COUNT: usize = 20;
pub const MAX_COUNT: usize = 100;

/// Priority used on create when none is given or the name does not resolve.
/// The tracker requires one; 3 is "normal" on a default space.
pub const DEFAULT_PRIORITY_ID: i64 = 3;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Clamp a requested page size to `1..=MAX_COUNT`, defaulting to `DEFAULT_COUNT`.
pub fn clamp_count(count: Option<usize>) -> usize {
    count.unwrap_or(DEFAULT_COUNT).clamp(1, MAX_COUNT)
}

#[derive(Debug, Clone, Default)]
pub struct CreateIssueInput {
    pub project_id: Option<i64>,
    /// Used when `project_id` is absent.
    pub project_key: Option<String>,
    pub summary: String,
    pub description: Option<String>,
    pub issue_type_id: Option<i64>,
    pub issue_type_name: Option<String>,
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

#[derive(Debug, Clone, Default)]
pub struct UpdateIssueInput {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub status_id: Option<i64>,
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

fn validate_date(field: &str, value: Option<String>) -> BackendResult<Option<String>> {
    if let Some(date) = &value {
        NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| {
            BackendError::validation(format!("{} must be yyyy-MM-dd, got '{}'", field, date))
        })?;
    }
    Ok(value)
}

/// The explicit ID if given, otherwise the resolved name.
async fn id_or_name<B: IssueBackend>(
    backend: &B,
    kind: EntityKind,
    scope: &str,
    id: Option<i64>,
    name: Option<&str>,
) -> Option<i64> {
    match (id, name) {
        (Some(id), _) => Some(id),
        (None, Some(name)) => resolve_id(backend, kind, Some(scope), name).await,
        (None, None) => None,
    }
}

async fn ids_or_names<B: IssueBackend>(
    backend: &B,
    kind: EntityKind,
    scope: &str,
    ids: Option<Vec<i64>>,
    names: Option<&[String]>,
) -> Option<Vec<i64>> {
    match (ids, names) {
        (Some(ids), _) => Some(ids),
        (None, Some(names)) => Some(resolve_all(backend, kind, Some(scope), names).await),
        (None, None) => None,
    }
}

/// Get an issue, failing with `NotFound` when it does not exist.
#[instrument(skip(backend))]
pub async fn get_issue<B: IssueBackend>(backend: &B, id_or_key: &str) -> BackendResult<Issue> {
    backend
        .get_issue(id_or_key)
        .await?
        .ok_or_else(|| BackendError::not_found("issue", id_or_key))
}

#[instrument(skip(backend))]
pub async fn list_issues<B: IssueBackend>(
    backend: &B,
    mut query: IssueQuery,
) -> BackendResult<Vec<Issue>> {
    query.count = query.count.clamp(1, MAX_COUNT);
    let issues = backend.list_issues(&query).await?;
    debug!(count = issues.len(), "listed issues");
    Ok(issues)
}

/// Create an issue, resolving name fields within the target project.
#[instrument(skip(backend, input), fields(summary = %input.summary))]
pub async fn create_issue<B: IssueBackend>(
    backend: &B,
    input: CreateIssueInput,
) -> BackendResult<Issue> {
    if input.summary.trim().is_empty() {
        return Err(BackendError::validation("summary must not be empty"));
    }
    let start_date = validate_date("start_date", input.start_date)?;
    let due_date = validate_date("due_date", input.due_date)?;

    let project_id = match (input.project_id, input.project_key.as_deref()) {
        (Some(id), _) => id,
        (None, Some(key)) => backend
            .get_project(key)
            .await?
            .map(|p| p.id)
            .ok_or_else(|| BackendError::not_found("project", key))?,
        (None, None) => {
            return Err(BackendError::validation(
                "Either project_id or project_key must be specified",
            ));
        }
    };
    let scope = project_id.to_string();

    let issue_type_id = id_or_name(
        backend,
        EntityKind::IssueType,
        &scope,
        input.issue_type_id,
        input.issue_type_name.as_deref(),
    )
    .await;
    let priority_id = id_or_name(
        backend,
        EntityKind::Priority,
        &scope,
        input.priority_id,
        input.priority_name.as_deref(),
    )
    .await
    .unwrap_or(DEFAULT_PRIORITY_ID);
    let assignee_id = id_or_name(
        backend,
        EntityKind::Assignee,
        &scope,
        input.assignee_id,
        input.assignee_name.as_deref(),
    )
    .await;
    let category_ids = ids_or_names(
        backend,
        EntityKind::Category,
        &scope,
        input.category_id,
        input.category_name.as_deref(),
    )
    .await;
    let milestone_ids = ids_or_names(
        backend,
        EntityKind::Milestone,
        &scope,
        input.milestone_id,
        input.milestone_name.as_deref(),
    )
    .await;
    let version_ids = ids_or_names(
        backend,
        EntityKind::Version,
        &scope,
        input.version_id,
        input.version_name.as_deref(),
    )
    .await;

    let fields = IssueFields::new()
        .id(IssueField::ProjectId, project_id)
        .text(IssueField::Summary, input.summary)
        .maybe_text(IssueField::Description, input.description)
        .maybe_id(IssueField::IssueTypeId, issue_type_id)
        .id(IssueField::PriorityId, priority_id)
        .maybe_id(IssueField::AssigneeId, assignee_id)
        .maybe_ids(IssueField::CategoryId, category_ids)
        .maybe_ids(IssueField::MilestoneId, milestone_ids)
        .maybe_ids(IssueField::VersionId, version_ids)
        .maybe_text(IssueField::StartDate, start_date)
        .maybe_text(IssueField::DueDate, due_date);

    let issue = backend.create_issue(&fields).await?;
    info!(issue_key = %issue.issue_key, "issue created");
    Ok(issue)
}

/// Apply a sparse update. The issue is fetched first so that names resolve
/// against its own project.
#[instrument(skip(backend, input))]
pub async fn update_issue<B: IssueBackend>(
    backend: &B,
    id_or_key: &str,
    input: UpdateIssueInput,
) -> BackendResult<Issue> {
    let start_date = validate_date("start_date", input.start_date)?;
    let due_date = validate_date("due_date", input.due_date)?;

    let current = get_issue(backend, id_or_key).await?;
    let scope = current.project_id.to_string();

    let status_id = id_or_name(
        backend,
        EntityKind::Status,
        &scope,
        input.status_id,
        input.status_name.as_deref(),
    )
    .await;
    let priority_id = id_or_name(
        backend,
        EntityKind::Priority,
        &scope,
        input.priority_id,
        input.priority_name.as_deref(),
    )
    .await;
    let assignee_id = id_or_name(
        backend,
        EntityKind::Assignee,
        &scope,
        input.assignee_id,
        input.assignee_name.as_deref(),
    )
    .await;
    let category_ids = ids_or_names(
        backend,
        EntityKind::Category,
        &scope,
        input.category_id,
        input.category_name.as_deref(),
    )
    .await;
    let milestone_ids = ids_or_names(
        backend,
        EntityKind::Milestone,
        &scope,
        input.milestone_id,
        input.milestone_name.as_deref(),
    )
    .await;
    let version_ids = ids_or_names(
        backend,
        EntityKind::Version,
        &scope,
        input.version_id,
        input.version_name.as_deref(),
    )
    .await;

    let fields = IssueFields::new()
        .maybe_text(IssueField::Summary, input.summary)
        .maybe_text(IssueField::Description, input.description)
        .maybe_id(IssueField::StatusId, status_id)
        .maybe_id(IssueField::PriorityId, priority_id)
        .maybe_id(IssueField::AssigneeId, assignee_id)
        .maybe_ids(IssueField::CategoryId, category_ids)
        .maybe_ids(IssueField::MilestoneId, milestone_ids)
        .maybe_ids(IssueField::VersionId, version_ids)
        .maybe_text(IssueField::StartDate, start_date)
        .maybe_text(IssueField::DueDate, due_date);

    let issue = backend.update_issue(id_or_key, &fields).await?;
    info!(issue_key = %issue.issue_key, fields = fields.len(), "issue updated");
    Ok(issue)
}

/// Delete one issue. A refused delete is reported as `NotFound`.
#[instrument(skip(backend))]
pub async fn delete_issue<B: IssueBackend>(backend: &B, id_or_key: &str) -> BackendResult<()> {
    if backend.delete_issue(id_or_key).await? {
        info!("issue deleted");
        Ok(())
    } else {
        Err(BackendError::not_found("issue", id_or_key))
    }
}

#[instrument(skip(backend, content))]
pub async fn add_comment<B: IssueBackend>(
    backend: &B,
    id_or_key: &str,
    content: &str,
) -> BackendResult<Comment> {
    if content.trim().is_empty() {
        return Err(BackendError::validation("comment content must not be empty"));
    }
    backend.add_comment(id_or_key, content).await
}

#[instrument(skip(backend))]
pub async fn list_comments<B: IssueBackend>(
    backend: &B,
    id_or_key: &str,
    count: Option<usize>,
) -> BackendResult<Vec<Comment>> {
    backend.list_comments(id_or_key, clamp_count(count)).await
}
