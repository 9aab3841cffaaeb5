//! ForceCompleteReviewHandler - maintenance operation.
//!
//! Marks every authoritative assignment for a document `completed` on
//! behalf of a supplied actor. Deliberately does not run the document
//! completion evaluator; the next status update (or a manual one) will
//! pick the new state up.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CommandMetadata, DocumentId, Timestamp, UserId};
use crate::domain::review::{reconcile, ReviewError};
use crate::ports::AssignmentRepository;

/// Command to force-complete a document's current assignments.
#[derive(Debug, Clone)]
pub struct ForceCompleteReviewCommand {
    pub document_id: DocumentId,
    /// Recorded as the completing actor on every assignment.
    pub completed_by: UserId,
}

/// Result of the force-complete.
#[derive(Debug, Clone)]
pub struct ForceCompleteReviewResult {
    /// Assignments marked completed.
    pub completed: usize,
    /// Superseded records purged along the way.
    pub purged: u64,
}

/// Handler for the force-complete operation.
pub struct ForceCompleteReviewHandler {
    assignments: Arc<dyn AssignmentRepository>,
}

impl ForceCompleteReviewHandler {
    pub fn new(assignments: Arc<dyn AssignmentRepository>) -> Self {
        Self { assignments }
    }

    pub async fn handle(
        &self,
        cmd: ForceCompleteReviewCommand,
        metadata: CommandMetadata,
    ) -> Result<ForceCompleteReviewResult, ReviewError> {
        let all = self.assignments.find_by_document(&cmd.document_id).await?;
        let reconciliation = reconcile(&all);

        let purged = if reconciliation.stale_ids().is_empty() {
            0
        } else {
            self.assignments
                .delete_many(reconciliation.stale_ids())
                .await?
        };

        let latest_ids: std::collections::HashSet<_> = reconciliation
            .latest()
            .iter()
            .map(|resolved| resolved.id)
            .collect();

        let now = Timestamp::now();
        let mut completed = 0usize;
        for assignment in &all {
            if !latest_ids.contains(&assignment.id()) {
                continue;
            }
            let mut updated = assignment.clone();
            updated.force_complete(cmd.completed_by.clone(), now);
            self.assignments.update(&updated).await?;
            completed += 1;
        }

        info!(
            document_id = %cmd.document_id,
            completed,
            purged,
            completed_by = %cmd.completed_by,
            requested_by = %metadata.user_id,
            "Force-completed review assignments"
        );

        Ok(ForceCompleteReviewResult { completed, purged })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAssignmentRepository;
    use crate::domain::review::{AssignmentStatus, ReviewAssignment};
    use crate::ports::AssignmentRepository as _;

    fn metadata() -> CommandMetadata {
        CommandMetadata::new(UserId::new("admin-1").unwrap())
    }

    #[tokio::test]
    async fn completes_every_latest_assignment_with_actor() {
        let doc = DocumentId::new();
        let admin = UserId::new("admin-1").unwrap();

        let assignments = Arc::new(InMemoryAssignmentRepository::new());
        let a = ReviewAssignment::new(doc, UserId::new("reviewer-1").unwrap(), None, None);
        let b = ReviewAssignment::new(doc, UserId::new("reviewer-2").unwrap(), None, None);
        assignments.save(&a).await.unwrap();
        assignments.save(&b).await.unwrap();

        let handler = ForceCompleteReviewHandler::new(assignments.clone());
        let result = handler
            .handle(
                ForceCompleteReviewCommand {
                    document_id: doc,
                    completed_by: admin.clone(),
                },
                metadata(),
            )
            .await
            .unwrap();

        assert_eq!(result.completed, 2);
        assert_eq!(result.purged, 0);

        for id in [a.id(), b.id()] {
            let stored = assignments.find_by_id(&id).await.unwrap().unwrap();
            assert_eq!(stored.status(), AssignmentStatus::Completed);
            assert_eq!(stored.completed_by(), Some(&admin));
            assert!(stored.completed_date().is_some());
        }
    }

    #[tokio::test]
    async fn purges_duplicates_and_completes_only_survivors() {
        let doc = DocumentId::new();
        let reviewer = UserId::new("reviewer-1").unwrap();

        let assignments = Arc::new(InMemoryAssignmentRepository::new());
        let old = ReviewAssignment::new(doc, reviewer.clone(), None, None);
        assignments.save(&old).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let newer = ReviewAssignment::new(doc, reviewer, None, None);
        assignments.save(&newer).await.unwrap();

        let handler = ForceCompleteReviewHandler::new(assignments.clone());
        let result = handler
            .handle(
                ForceCompleteReviewCommand {
                    document_id: doc,
                    completed_by: UserId::new("admin-1").unwrap(),
                },
                metadata(),
            )
            .await
            .unwrap();

        assert_eq!(result.completed, 1);
        assert_eq!(result.purged, 1);
        assert!(assignments.find_by_id(&old.id()).await.unwrap().is_none());
        let stored = assignments.find_by_id(&newer.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), AssignmentStatus::Completed);
    }
}
