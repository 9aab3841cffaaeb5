//! UpdateAssignmentStatusHandler - the review cycle engine's trigger point.
//!
//! Every assignment status change flows through here: the record is
//! updated, the update-required sub-flow may spawn a follow-up assignment
//! to the document author, and document-level completion is re-evaluated
//! against the reconciled assignment set.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::foundation::{AssignmentId, CommandMetadata, Timestamp};
use crate::domain::review::{
    evaluate_transition, next_schedule, reconcile, AssignmentStatus, CompletionTransition,
    Document, ReviewAssignment, ReviewError,
};
use crate::ports::{
    AssignmentRepository, DocumentRepository, NotificationKind, NotificationSender,
    ReviewNotification, UserReader,
};

/// Command carrying a reviewer's status update.
#[derive(Debug, Clone)]
pub struct UpdateAssignmentStatusCommand {
    /// The assignment being updated.
    pub assignment_id: AssignmentId,
    /// New status for the assignment.
    pub status: AssignmentStatus,
    /// Reviewer flagged the document as needing changes.
    pub requires_updates: bool,
    /// Free text explaining the required changes.
    pub update_notes: Option<String>,
}

/// Result of a successful status update.
#[derive(Debug, Clone)]
pub struct UpdateAssignmentStatusResult {
    /// The updated assignment.
    pub assignment: ReviewAssignment,
    /// Follow-up assignment spawned by the update-required sub-flow, if any.
    pub spawned_update_request: Option<ReviewAssignment>,
    /// Document-level completion transition that was applied.
    pub transition: CompletionTransition,
    /// The document's review state after the transition.
    pub document: Document,
}

/// Handler for assignment status updates.
pub struct UpdateAssignmentStatusHandler {
    assignments: Arc<dyn AssignmentRepository>,
    documents: Arc<dyn DocumentRepository>,
    users: Arc<dyn UserReader>,
    notifier: Arc<dyn NotificationSender>,
}

impl UpdateAssignmentStatusHandler {
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        documents: Arc<dyn DocumentRepository>,
        users: Arc<dyn UserReader>,
        notifier: Arc<dyn NotificationSender>,
    ) -> Self {
        Self {
            assignments,
            documents,
            users,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateAssignmentStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateAssignmentStatusResult, ReviewError> {
        let now = Timestamp::now();

        // 1. Load the assignment and its document
        let mut assignment = self
            .assignments
            .find_by_id(&cmd.assignment_id)
            .await?
            .ok_or(ReviewError::AssignmentNotFound(cmd.assignment_id))?;

        let mut document = self
            .documents
            .find_by_id(&assignment.document_id())
            .await?
            .ok_or(ReviewError::DocumentNotFound(assignment.document_id()))?;

        // 2. Apply the reviewer's update
        assignment.set_status(cmd.status, &metadata.user_id, now);
        if cmd.requires_updates {
            assignment.flag_updates_required(cmd.update_notes.clone());
        }
        self.assignments.update(&assignment).await?;

        // 3. Update-required sub-flow: spawn the author-directed follow-up
        let spawned = if cmd.requires_updates {
            let follow_up = assignment.spawn_update_request(document.author().clone(), now)?;
            self.assignments.save(&follow_up).await?;
            self.notify_author(&document, &assignment).await;
            Some(follow_up)
        } else {
            None
        };

        // 4. Re-evaluate document-level completion over the reconciled set
        let transition = self.evaluate_completion(&mut document, now).await?;

        info!(
            assignment_id = %cmd.assignment_id,
            document_id = %document.id(),
            status = cmd.status.as_str(),
            transition = ?transition,
            "Assignment status updated"
        );

        Ok(UpdateAssignmentStatusResult {
            assignment,
            spawned_update_request: spawned,
            transition,
            document,
        })
    }

    /// Reconciles, purges stale records, and applies the completion
    /// transition. Re-running from persisted state always converges to the
    /// same answer, so concurrent updates merely delay convergence.
    async fn evaluate_completion(
        &self,
        document: &mut Document,
        now: Timestamp,
    ) -> Result<CompletionTransition, ReviewError> {
        let all = self.assignments.find_by_document(&document.id()).await?;
        let reconciliation = reconcile(&all);

        if !reconciliation.stale_ids().is_empty() {
            let deleted = self
                .assignments
                .delete_many(reconciliation.stale_ids())
                .await?;
            debug!(
                document_id = %document.id(),
                deleted,
                "Purged stale assignments during evaluation"
            );
        }

        let current = reconciliation.restricted_to(document.review_assignees());
        let transition = evaluate_transition(document.review_completed(), &current);

        match transition {
            CompletionTransition::Completed => {
                let schedule = next_schedule(
                    now,
                    document.review_interval(),
                    document.review_interval_days(),
                    document.review_period(),
                );
                document.complete_cycle(&schedule, now);
                self.documents.update_review_state(document).await?;
                info!(
                    document_id = %document.id(),
                    next_opens = ?schedule.opens_for_review,
                    "Review cycle completed"
                );
            }
            CompletionTransition::Reopened => {
                document.reopen_cycle(now);
                self.documents.update_review_state(document).await?;
                info!(document_id = %document.id(), "Review cycle reopened");
            }
            CompletionTransition::Unchanged => {}
        }

        Ok(transition)
    }

    /// Best-effort author notification; failure is logged, never propagated.
    async fn notify_author(&self, document: &Document, flagging: &ReviewAssignment) {
        let reviewer_name = match flagging.assignee() {
            Some(id) => match self.users.find_by_id(id).await {
                Ok(Some(profile)) => profile.display_name,
                _ => id.to_string(),
            },
            None => "a reviewer".to_string(),
        };

        let notification = ReviewNotification {
            kind: NotificationKind::UpdateRequested,
            document_id: document.id(),
            document_title: document.title().to_string(),
            message: format!(
                "{} requested changes to \"{}\": {}",
                reviewer_name,
                document.title(),
                flagging
                    .update_notes()
                    .unwrap_or(crate::domain::review::DEFAULT_UPDATE_NOTES)
            ),
        };

        if let Err(e) = self.notifier.send(document.author(), &notification).await {
            warn!(
                document_id = %document.id(),
                author = %document.author(),
                error = %e,
                "Failed to notify author of update request"
            );
        }
    }
}
