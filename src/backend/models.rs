//! Issue tracker records.
//!
//! These mirror the subset of Backlog's JSON that the façade exposes. Field
//! names follow Backlog's camelCase wire format in both directions.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lookup categories that can be resolved from a display name to an ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Status,
    Priority,
    Assignee,
    Category,
    Milestone,
    Version,
    IssueType,
}

impl EntityKind {
    /// Whether the listing depends on a project.
    ///
    /// Priorities and users are space-wide; everything else is project-local.
    pub fn is_scoped(self) -> bool {
        !matches!(self, EntityKind::Priority | EntityKind::Assignee)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Status => "status",
            EntityKind::Priority => "priority",
            EntityKind::Assignee => "assignee",
            EntityKind::Category => "category",
            EntityKind::Milestone => "milestone",
            EntityKind::Version => "version",
            EntityKind::IssueType => "issue type",
        };
        f.write_str(s)
    }
}

/// Any `{id, name}` pair: statuses, priorities, categories, versions, ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NamedEntity {
    #[schema(example = 2)]
    pub id: i64,
    #[schema(example = "In Progress")]
    pub name: String,
}

impl NamedEntity {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "TEST")]
    pub project_key: String,
    #[schema(example = "Test Project")]
    pub name: String,
    #[serde(default)]
    pub archived: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    /// Login ID
    #[serde(default)]
    pub user_id: Option<String>,
    #[schema(example = "Taro Yamada")]
    pub name: String,
    #[serde(default)]
    pub mail_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: i64,
    pub project_id: i64,
    #[schema(example = "TEST-1")]
    pub issue_key: String,
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub issue_type: Option<NamedEntity>,
    #[serde(default)]
    pub status: Option<NamedEntity>,
    #[serde(default)]
    pub priority: Option<NamedEntity>,
    #[serde(default)]
    pub assignee: Option<User>,
    #[serde(default)]
    pub category: Vec<NamedEntity>,
    #[serde(default)]
    pub versions: Vec<NamedEntity>,
    #[serde(default)]
    pub milestone: Vec<NamedEntity>,
    #[serde(default)]
    #[schema(example = "2025-01-01")]
    pub start_date: Option<String>,
    #[serde(default)]
    #[schema(example = "2025-01-31")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_user: Option<User>,
    #[serde(default)]
    pub created: Option<String>,
}

/// Filters for listing issues.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueQuery {
    pub project_id: Option<i64>,
    pub status_ids: Vec<i64>,
    pub assignee_id: Option<i64>,
    pub keyword: Option<String>,
    pub count: usize,
}
