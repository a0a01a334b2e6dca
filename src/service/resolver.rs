//! Name-to-ID resolution.
//!
//! Callers may refer to statuses, priorities, users, categories, milestones,
//! versions and issue types by display name. Resolution lists the candidates
//! for the kind and performs a case-sensitive exact match. A miss is never an
//! error: the caller simply drops the field.

use tracing::{debug, instrument, warn};

use crate::backend::{EntityKind, IssueBackend, NamedEntity};

/// Exact, case-sensitive match on display name. First match in listing order wins.
pub fn find_by_name(candidates: &[NamedEntity], name: &str) -> Option<i64> {
    candidates.iter().find(|c| c.name == name).map(|c| c.id)
}

/// Resolve `name` to an ID for `kind`.
///
/// `scope` is a project ID or key. Returns `None` when nothing matches, when
/// a project-scoped kind is asked for without a scope, or when the listing
/// call fails.
#[instrument(skip(backend))]
pub async fn resolve_id<B: IssueBackend>(
    backend: &B,
    kind: EntityKind,
    scope: Option<&str>,
    name: &str,
) -> Option<i64> {
    if kind.is_scoped() && scope.is_none() {
        debug!(%kind, name, "no project to resolve against");
        return None;
    }

    match backend.list_candidates(kind, scope).await {
        Ok(candidates) => {
            let id = find_by_name(&candidates, name);
            if id.is_none() {
                debug!(%kind, name, candidates = candidates.len(), "name did not match");
            }
            id
        }
        Err(e) => {
            warn!(%kind, name, error = %e, "candidate listing failed, treating as unresolved");
            None
        }
    }
}

/// Resolve each name independently, keeping only the hits in input order.
pub async fn resolve_all<B: IssueBackend>(
    backend: &B,
    kind: EntityKind,
    scope: Option<&str>,
    names: &[String],
) -> Vec<i64> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        if let Some(id) = resolve_id(backend, kind, scope, name).await {
            ids.push(id);
        }
    }
    ids
}
