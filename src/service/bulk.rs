//! Bulk operations.
//!
//! One mutation applied to many issues, sequentially and in input order.
//! Failures are isolated per item: an error or a refused delete is recorded
//! in the report and the batch moves on. There is no rollback.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::backend::{BackendResult, IssueBackend, IssueField, IssueFields};

/// The single change a bulk call applies to every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Status(i64),
    Assignee(i64),
    Priority(i64),
    Milestone(i64),
    Category(i64),
    Delete,
}

impl Mutation {
    /// Sparse update payload, or `None` for a delete.
    ///
    /// Milestone and category are list fields on the tracker, so the scalar
    /// ID is sent as a one-element list.
    pub fn to_fields(self) -> Option<IssueFields> {
        let fields = IssueFields::new();
        match self {
            Mutation::Status(id) => Some(fields.id(IssueField::StatusId, id)),
            Mutation::Assignee(id) => Some(fields.id(IssueField::AssigneeId, id)),
            Mutation::Priority(id) => Some(fields.id(IssueField::PriorityId, id)),
            Mutation::Milestone(id) => Some(fields.ids(IssueField::MilestoneId, vec![id])),
            Mutation::Category(id) => Some(fields.ids(IssueField::CategoryId, vec![id])),
            Mutation::Delete => None,
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Status(id) => write!(f, "status={}", id),
            Mutation::Assignee(id) => write!(f, "assignee={}", id),
            Mutation::Priority(id) => write!(f, "priority={}", id),
            Mutation::Milestone(id) => write!(f, "milestone={}", id),
            Mutation::Category(id) => write!(f, "category={}", id),
            Mutation::Delete => f.write_str("delete"),
        }
    }
}

/// Aggregate report of a bulk run.
///
/// `success + failed == total` and `failed_issues.len() == failed` always hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BulkResult {
    /// Number of items in the request
    #[schema(example = 3)]
    pub total: usize,
    #[schema(example = 2)]
    pub success: usize,
    #[schema(example = 1)]
    pub failed: usize,
    /// Identifiers that failed, in input order
    #[schema(example = json!(["TEST-3"]))]
    pub failed_issues: Vec<String>,
}

impl BulkResult {
    fn starting(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    fn record_failure(&mut self, item: &str) {
        self.failed += 1;
        self.failed_issues.push(item.to_string());
    }
}

/// Run `op` once per item, in order, isolating failures.
///
/// `Ok(true)` counts as a success; `Ok(false)` and `Err(_)` are both recorded
/// as failures of that item. The whole list is always processed.
pub async fn run_isolated<'a, F, Fut>(items: &'a [String], mut op: F) -> BulkResult
where
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = BackendResult<bool>>,
{
    let mut result = BulkResult::starting(items.len());

    for item in items {
        match op(item).await {
            Ok(true) => result.success += 1,
            Ok(false) => {
                warn!(item = %item, "tracker refused the operation");
                result.record_failure(item);
            }
            Err(e) => {
                warn!(item = %item, error = %e, "bulk item failed");
                result.record_failure(item);
            }
        }
    }

    result
}

/// Apply `mutation` to every issue in `items`.
#[instrument(skip(backend, items, mutation), fields(total = items.len(), %mutation))]
pub async fn apply_bulk<B: IssueBackend>(
    backend: &B,
    items: &[String],
    mutation: Mutation,
) -> BulkResult {
    let result = match mutation.to_fields() {
        None => run_isolated(items, |item| backend.delete_issue(item)).await,
        Some(fields) => {
            let fields = &fields;
            run_isolated(items, |item| async move {
                backend.update_issue(item, fields).await.map(|_| true)
            })
            .await
        }
    };

    info!(
        success = result.success,
        failed = result.failed,
        "bulk operation finished"
    );
    result
}
