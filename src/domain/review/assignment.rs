//! Review assignment record.
//!
//! One `ReviewAssignment` exists per (document, reviewer, cycle attempt).
//! Records are superseded rather than mutated when an update-required flow
//! spawns a replacement; the reconciler collapses them back down to one
//! authoritative record per reviewer.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AssignmentId, DocumentId, DomainError, Timestamp, UserId};

/// Days a spawned update-request assignment gets before it is due.
pub const UPDATE_REQUEST_DUE_DAYS: i64 = 7;

/// Fallback text when a reviewer flags updates without notes.
pub const DEFAULT_UPDATE_NOTES: &str = "Reviewer requested changes to this document";

/// Status of a single review assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStatus {
    Pending,
    InProgress,
    Completed,
    Overdue,
}

impl AssignmentStatus {
    /// Wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::InProgress => "in-progress",
            AssignmentStatus::Completed => "completed",
            AssignmentStatus::Overdue => "overdue",
        }
    }

    /// Parses the wire/storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(AssignmentStatus::Pending),
            "in-progress" => Some(AssignmentStatus::InProgress),
            "completed" => Some(AssignmentStatus::Completed),
            "overdue" => Some(AssignmentStatus::Overdue),
            _ => None,
        }
    }
}

/// A single review obligation: one reviewer, one document, one cycle attempt.
///
/// # Invariants
///
/// - `assignee` may be dangling (the user was deleted); such records are
///   invalid and get purged by reconciliation, never surfaced as evidence
///   of incompletion.
/// - For a (document, assignee) pair only the most-recently-created record
///   is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewAssignment {
    id: AssignmentId,
    document_id: DocumentId,
    assignee: Option<UserId>,
    assigned_by: Option<UserId>,
    due_date: Option<Timestamp>,
    status: AssignmentStatus,
    completed_date: Option<Timestamp>,
    completed_by: Option<UserId>,
    requires_updates: bool,
    update_notes: Option<String>,
    notes: Option<String>,
    /// Back-reference to the flagging assignment when this record was
    /// spawned as an update-request follow-up.
    update_assignment: Option<AssignmentId>,
    created_at: Timestamp,
}

impl ReviewAssignment {
    /// Creates a fresh pending assignment for a reviewer.
    pub fn new(
        document_id: DocumentId,
        assignee: UserId,
        assigned_by: Option<UserId>,
        due_date: Option<Timestamp>,
    ) -> Self {
        Self {
            id: AssignmentId::new(),
            document_id,
            assignee: Some(assignee),
            assigned_by,
            due_date,
            status: AssignmentStatus::Pending,
            completed_date: None,
            completed_by: None,
            requires_updates: false,
            update_notes: None,
            notes: None,
            update_assignment: None,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute an assignment from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: AssignmentId,
        document_id: DocumentId,
        assignee: Option<UserId>,
        assigned_by: Option<UserId>,
        due_date: Option<Timestamp>,
        status: AssignmentStatus,
        completed_date: Option<Timestamp>,
        completed_by: Option<UserId>,
        requires_updates: bool,
        update_notes: Option<String>,
        notes: Option<String>,
        update_assignment: Option<AssignmentId>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            document_id,
            assignee,
            assigned_by,
            due_date,
            status,
            completed_date,
            completed_by,
            requires_updates,
            update_notes,
            notes,
            update_assignment,
            created_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> AssignmentId {
        self.id
    }

    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    /// The assigned reviewer, if the reference is still intact.
    pub fn assignee(&self) -> Option<&UserId> {
        self.assignee.as_ref()
    }

    pub fn assigned_by(&self) -> Option<&UserId> {
        self.assigned_by.as_ref()
    }

    pub fn due_date(&self) -> Option<&Timestamp> {
        self.due_date.as_ref()
    }

    pub fn status(&self) -> AssignmentStatus {
        self.status
    }

    pub fn completed_date(&self) -> Option<&Timestamp> {
        self.completed_date.as_ref()
    }

    pub fn completed_by(&self) -> Option<&UserId> {
        self.completed_by.as_ref()
    }

    pub fn requires_updates(&self) -> bool {
        self.requires_updates
    }

    pub fn update_notes(&self) -> Option<&str> {
        self.update_notes.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn update_assignment(&self) -> Option<AssignmentId> {
        self.update_assignment
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Applies a reviewer's status update.
    ///
    /// Entering `completed` stamps `completed_date`/`completed_by`; leaving
    /// it clears them again so a reverted assignment carries no stale
    /// completion evidence.
    pub fn set_status(&mut self, status: AssignmentStatus, actor: &UserId, now: Timestamp) {
        self.status = status;
        if status == AssignmentStatus::Completed {
            self.completed_date = Some(now);
            self.completed_by = Some(actor.clone());
        } else {
            self.completed_date = None;
            self.completed_by = None;
        }
    }

    /// Records the reviewer's update-required flag and notes.
    pub fn flag_updates_required(&mut self, notes: Option<String>) {
        self.requires_updates = true;
        self.update_notes = notes.filter(|n| !n.trim().is_empty());
    }

    /// Spawns the follow-up assignment directed at the document author.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if this assignment has no resolvable reviewer
    ///   to attribute the request to.
    pub fn spawn_update_request(
        &self,
        author: UserId,
        now: Timestamp,
    ) -> Result<ReviewAssignment, DomainError> {
        let reviewer = self
            .assignee
            .clone()
            .ok_or_else(|| DomainError::validation("assignee", "Assignment has no reviewer"))?;

        let notes = self
            .update_notes
            .clone()
            .unwrap_or_else(|| DEFAULT_UPDATE_NOTES.to_string());

        Ok(Self {
            id: AssignmentId::new(),
            document_id: self.document_id,
            assignee: Some(author),
            assigned_by: Some(reviewer),
            due_date: Some(now.add_days(UPDATE_REQUEST_DUE_DAYS)),
            status: AssignmentStatus::Pending,
            completed_date: None,
            completed_by: None,
            requires_updates: false,
            update_notes: None,
            notes: Some(notes),
            update_assignment: Some(self.id),
            created_at: now,
        })
    }

    /// Administrative completion override.
    pub fn force_complete(&mut self, completed_by: UserId, now: Timestamp) {
        self.status = AssignmentStatus::Completed;
        self.completed_date = Some(now);
        self.completed_by = Some(completed_by);
    }

    /// Resets the record for a manually restarted cycle.
    pub fn reset_for_new_cycle(&mut self) {
        self.status = AssignmentStatus::Pending;
        self.completed_date = None;
        self.completed_by = None;
        self.requires_updates = false;
        self.update_notes = None;
    }

    /// Produces the resolved view used by reconciliation and evaluation.
    ///
    /// Returns `None` when the assignee reference is dangling; such records
    /// never reach business logic, which is what lets the evaluator run
    /// without null checks.
    pub fn resolve(&self) -> Option<ResolvedAssignment> {
        self.assignee.clone().map(|assignee| ResolvedAssignment {
            id: self.id,
            assignee,
            status: self.status,
            requires_updates: self.requires_updates,
            created_at: self.created_at,
        })
    }
}

/// An assignment whose reviewer reference resolved successfully.
///
/// Constructed only by [`ReviewAssignment::resolve`]; downstream logic can
/// rely on `assignee` being present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAssignment {
    pub id: AssignmentId,
    pub assignee: UserId,
    pub status: AssignmentStatus,
    pub requires_updates: bool,
    pub created_at: Timestamp,
}

impl ResolvedAssignment {
    pub fn is_completed(&self) -> bool {
        self.status == AssignmentStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviewer() -> UserId {
        UserId::new("reviewer-1").unwrap()
    }

    fn author() -> UserId {
        UserId::new("author-1").unwrap()
    }

    fn test_assignment() -> ReviewAssignment {
        ReviewAssignment::new(DocumentId::new(), reviewer(), Some(author()), None)
    }

    #[test]
    fn new_assignment_is_pending() {
        let a = test_assignment();
        assert_eq!(a.status(), AssignmentStatus::Pending);
        assert!(!a.requires_updates());
        assert!(a.completed_date().is_none());
    }

    #[test]
    fn set_status_completed_stamps_completion() {
        let mut a = test_assignment();
        let now = Timestamp::now();
        a.set_status(AssignmentStatus::Completed, &reviewer(), now);

        assert_eq!(a.status(), AssignmentStatus::Completed);
        assert_eq!(a.completed_date(), Some(&now));
        assert_eq!(a.completed_by(), Some(&reviewer()));
    }

    #[test]
    fn reverting_completed_clears_completion_fields() {
        let mut a = test_assignment();
        a.set_status(AssignmentStatus::Completed, &reviewer(), Timestamp::now());
        a.set_status(AssignmentStatus::Pending, &reviewer(), Timestamp::now());

        assert_eq!(a.status(), AssignmentStatus::Pending);
        assert!(a.completed_date().is_none());
        assert!(a.completed_by().is_none());
    }

    #[test]
    fn flag_updates_required_keeps_notes() {
        let mut a = test_assignment();
        a.flag_updates_required(Some("fix typo".to_string()));
        assert!(a.requires_updates());
        assert_eq!(a.update_notes(), Some("fix typo"));
    }

    #[test]
    fn flag_updates_required_drops_blank_notes() {
        let mut a = test_assignment();
        a.flag_updates_required(Some("   ".to_string()));
        assert!(a.requires_updates());
        assert!(a.update_notes().is_none());
    }

    #[test]
    fn spawn_update_request_targets_author() {
        let mut a = test_assignment();
        a.flag_updates_required(Some("fix typo".to_string()));
        let now = Timestamp::now();

        let follow_up = a.spawn_update_request(author(), now).unwrap();

        assert_eq!(follow_up.assignee(), Some(&author()));
        assert_eq!(follow_up.assigned_by(), Some(&reviewer()));
        assert_eq!(follow_up.status(), AssignmentStatus::Pending);
        assert_eq!(follow_up.due_date(), Some(&now.add_days(7)));
        assert!(follow_up.notes().unwrap().contains("fix typo"));
        assert_eq!(follow_up.update_assignment(), Some(a.id()));
    }

    #[test]
    fn spawn_update_request_uses_fallback_notes() {
        let mut a = test_assignment();
        a.flag_updates_required(None);

        let follow_up = a.spawn_update_request(author(), Timestamp::now()).unwrap();
        assert_eq!(follow_up.notes(), Some(DEFAULT_UPDATE_NOTES));
    }

    #[test]
    fn spawn_update_request_fails_without_reviewer() {
        let a = ReviewAssignment::reconstitute(
            AssignmentId::new(),
            DocumentId::new(),
            None,
            None,
            None,
            AssignmentStatus::Pending,
            None,
            None,
            true,
            None,
            None,
            None,
            Timestamp::now(),
        );
        assert!(a.spawn_update_request(author(), Timestamp::now()).is_err());
    }

    #[test]
    fn force_complete_sets_actor() {
        let mut a = test_assignment();
        let admin = UserId::new("admin-1").unwrap();
        a.force_complete(admin.clone(), Timestamp::now());

        assert_eq!(a.status(), AssignmentStatus::Completed);
        assert_eq!(a.completed_by(), Some(&admin));
    }

    #[test]
    fn reset_for_new_cycle_clears_progress() {
        let mut a = test_assignment();
        a.set_status(AssignmentStatus::Completed, &reviewer(), Timestamp::now());
        a.flag_updates_required(Some("stale".to_string()));

        a.reset_for_new_cycle();

        assert_eq!(a.status(), AssignmentStatus::Pending);
        assert!(a.completed_date().is_none());
        assert!(!a.requires_updates());
        assert!(a.update_notes().is_none());
    }

    #[test]
    fn resolve_requires_assignee() {
        let a = test_assignment();
        let resolved = a.resolve().unwrap();
        assert_eq!(resolved.assignee, reviewer());
        assert_eq!(resolved.id, a.id());

        let orphan = ReviewAssignment::reconstitute(
            AssignmentId::new(),
            DocumentId::new(),
            None,
            None,
            None,
            AssignmentStatus::Completed,
            None,
            None,
            false,
            None,
            None,
            None,
            Timestamp::now(),
        );
        assert!(orphan.resolve().is_none());
    }

    #[test]
    fn status_string_roundtrips() {
        for status in [
            AssignmentStatus::Pending,
            AssignmentStatus::InProgress,
            AssignmentStatus::Completed,
            AssignmentStatus::Overdue,
        ] {
            assert_eq!(AssignmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AssignmentStatus::parse("nope"), None);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&AssignmentStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }
}
