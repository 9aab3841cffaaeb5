//! Assignment reconciler.
//!
//! Collapses the raw assignment records for a document down to exactly one
//! authoritative record per distinct, still-resolvable assignee: the most
//! recently created one. Everything else (older duplicates, records whose
//! assignee was deleted) is stale and scheduled for deletion.
//!
//! Reconciliation is idempotent: running it on an already-reconciled set
//! keeps the same authoritative records and marks nothing stale.

use std::collections::HashSet;

use super::assignment::{ResolvedAssignment, ReviewAssignment};
use crate::domain::foundation::{AssignmentId, UserId};

/// Outcome of reconciling a document's assignment records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    latest: Vec<ResolvedAssignment>,
    stale_ids: Vec<AssignmentId>,
}

impl Reconciliation {
    /// The authoritative set: one record per assignee, newest first.
    pub fn latest(&self) -> &[ResolvedAssignment] {
        &self.latest
    }

    /// Record ids superseded by newer ones or lacking an assignee.
    pub fn stale_ids(&self) -> &[AssignmentId] {
        &self.stale_ids
    }

    /// The authoritative set restricted to the document's current
    /// reviewer list.
    ///
    /// A kept record whose assignee was removed from the cycle is orphaned
    /// relative to the current cycle: excluded from completion evaluation
    /// even though it is not a stale duplicate on disk.
    pub fn restricted_to<'a>(&'a self, assignees: &[UserId]) -> Vec<&'a ResolvedAssignment> {
        self.latest
            .iter()
            .filter(|a| assignees.contains(&a.assignee))
            .collect()
    }
}

/// Reconciles all assignment records for one document.
///
/// Sorts by creation time descending and keeps the first occurrence per
/// assignee; later occurrences and null-assignee records are marked stale.
/// Input ordering does not affect the result.
pub fn reconcile(assignments: &[ReviewAssignment]) -> Reconciliation {
    let mut ordered: Vec<&ReviewAssignment> = assignments.iter().collect();
    ordered.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

    let mut seen: HashSet<UserId> = HashSet::new();
    let mut latest = Vec::new();
    let mut stale_ids = Vec::new();

    for assignment in ordered {
        match assignment.resolve() {
            None => stale_ids.push(assignment.id()),
            Some(resolved) => {
                if seen.insert(resolved.assignee.clone()) {
                    latest.push(resolved);
                } else {
                    stale_ids.push(assignment.id());
                }
            }
        }
    }

    Reconciliation { latest, stale_ids }
}
