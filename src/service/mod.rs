//! Service layer shared by the REST and MCP surfaces.
//!
//! # Architecture
//!
//! - `resolver`: Display name to ID resolution
//! - `bulk`: One mutation over many issues with per-item failure isolation
//! - `issues`: Single-issue resolve-then-mutate and reads
//! - `projects`: Project, user and priority lookups
//!
//! Every function is generic over `B: IssueBackend`.

mod bulk;
mod issues;
mod projects;
mod resolver;

#[cfg(test)]
mod issues_test;

pub use bulk::{BulkResult, Mutation, apply_bulk, run_isolated};
pub use issues::{
    CreateIssueInput, DEFAULT_COUNT, DEFAULT_PRIORITY_ID, MAX_COUNT, UpdateIssueInput,
    add_comment, clamp_count, create_issue, delete_issue, get_issue, list_comments, list_issues,
    update_issue,
};
pub use projects::{
    get_project, list_priorities, list_project_lookup, list_projects, list_users,
};
pub use resolver::{find_by_name, resolve_all, resolve_id};
