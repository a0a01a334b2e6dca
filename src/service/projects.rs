//! Project and space-wide lookups.

use tracing::instrument;

use crate::backend::{
    BackendError, BackendResult, EntityKind, IssueBackend, NamedEntity, Project, User,
};

#[instrument(skip(backend))]
pub async fn list_projects<B: IssueBackend>(backend: &B) -> BackendResult<Vec<Project>> {
    backend.list_projects().await
}

/// Get a project by ID or key, failing with `NotFound` when it does not exist.
#[instrument(skip(backend))]
pub async fn get_project<B: IssueBackend>(backend: &B, id_or_key: &str) -> BackendResult<Project> {
    backend
        .get_project(id_or_key)
        .await?
        .ok_or_else(|| BackendError::not_found("project", id_or_key))
}

/// List the statuses, issue types, categories, milestones or versions of a
/// project. A 404 from the tracker means the project does not exist.
#[instrument(skip(backend))]
pub async fn list_project_lookup<B: IssueBackend>(
    backend: &B,
    kind: EntityKind,
    project: &str,
) -> BackendResult<Vec<NamedEntity>> {
    match backend.list_candidates(kind, Some(project)).await {
        Err(BackendError::Http { status: 404, .. }) => {
            Err(BackendError::not_found("project", project))
        }
        other => other,
    }
}

#[instrument(skip(backend))]
pub async fn list_users<B: IssueBackend>(backend: &B) -> BackendResult<Vec<User>> {
    backend.list_users().await
}

#[instrument(skip(backend))]
pub async fn list_priorities<B: IssueBackend>(backend: &B) -> BackendResult<Vec<NamedEntity>> {
    backend.list_candidates(EntityKind::Priority, None).await
}
