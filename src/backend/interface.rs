//! The issue tracker capability interface.
//!
//! Everything above this trait (services, REST handlers, MCP tools) is
//! generic over `B: IssueBackend`, so the vendor client can be swapped for a
//! scripted double in tests.

use std::future::Future;

use crate::backend::{
    BackendResult, Comment, EntityKind, Issue, IssueFields, IssueQuery, NamedEntity, Project, User,
};

pub trait IssueBackend: Send + Sync {
    /// List every `{id, name}` candidate for `kind`.
    ///
    /// `scope` is a project ID or key; unscoped kinds ignore it.
    fn list_candidates(
        &self,
        kind: EntityKind,
        scope: Option<&str>,
    ) -> impl Future<Output = BackendResult<Vec<NamedEntity>>> + Send;

    fn list_projects(&self) -> impl Future<Output = BackendResult<Vec<Project>>> + Send;

    /// Get a project by ID or key. `Ok(None)` when it does not exist.
    fn get_project(
        &self,
        id_or_key: &str,
    ) -> impl Future<Output = BackendResult<Option<Project>>> + Send;

    fn list_users(&self) -> impl Future<Output = BackendResult<Vec<User>>> + Send;

    fn list_issues(
        &self,
        query: &IssueQuery,
    ) -> impl Future<Output = BackendResult<Vec<Issue>>> + Send;

    /// Get an issue by ID or key. `Ok(None)` when it does not exist.
    fn get_issue(
        &self,
        id_or_key: &str,
    ) -> impl Future<Output = BackendResult<Option<Issue>>> + Send;

    fn create_issue(&self, fields: &IssueFields)
    -> impl Future<Output = BackendResult<Issue>> + Send;

    /// Apply a sparse update. Fields absent from `fields` are left untouched.
    fn update_issue(
        &self,
        id_or_key: &str,
        fields: &IssueFields,
    ) -> impl Future<Output = BackendResult<Issue>> + Send;

    /// Delete an issue. `Ok(false)` means the tracker refused without an error.
    fn delete_issue(&self, id_or_key: &str) -> impl Future<Output = BackendResult<bool>> + Send;

    fn add_comment(
        &self,
        id_or_key: &str,
        content: &str,
    ) -> impl Future<Output = BackendResult<Comment>> + Send;

    fn list_comments(
        &self,
        id_or_key: &str,
        count: usize,
    ) -> impl Future<Output = BackendResult<Vec<Comment>>> + Send;
}
