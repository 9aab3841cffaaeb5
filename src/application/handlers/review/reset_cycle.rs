//! ResetReviewCycleHandler - maintenance operation.
//!
//! Returns every assignment for a document to `pending`, clearing
//! completion and update-request fields, and clears the document's
//! completion flag so the cycle starts fresh.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CommandMetadata, DocumentId, Timestamp};
use crate::domain::review::ReviewError;
use crate::ports::{AssignmentRepository, DocumentRepository};

/// Command to reset a document's review cycle.
#[derive(Debug, Clone)]
pub struct ResetReviewCycleCommand {
    pub document_id: DocumentId,
}

/// Result of the reset.
#[derive(Debug, Clone)]
pub struct ResetReviewCycleResult {
    /// Assignments returned to pending.
    pub reset: usize,
}

/// Handler for the cycle reset.
pub struct ResetReviewCycleHandler {
    assignments: Arc<dyn AssignmentRepository>,
    documents: Arc<dyn DocumentRepository>,
}

impl ResetReviewCycleHandler {
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        documents: Arc<dyn DocumentRepository>,
    ) -> Self {
        Self {
            assignments,
            documents,
        }
    }

    pub async fn handle(
        &self,
        cmd: ResetReviewCycleCommand,
        metadata: CommandMetadata,
    ) -> Result<ResetReviewCycleResult, ReviewError> {
        let mut document = self
            .documents
            .find_by_id(&cmd.document_id)
            .await?
            .ok_or(ReviewError::DocumentNotFound(cmd.document_id))?;

        let all = self.assignments.find_by_document(&cmd.document_id).await?;

        let mut reset = 0usize;
        for assignment in &all {
            let mut updated = assignment.clone();
            updated.reset_for_new_cycle();
            self.assignments.update(&updated).await?;
            reset += 1;
        }

        document.reset_cycle(Timestamp::now());
        self.documents.update_review_state(&document).await?;

        info!(
            document_id = %cmd.document_id,
            reset,
            requested_by = %metadata.user_id,
            "Reset review cycle"
        );

        Ok(ResetReviewCycleResult { reset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryAssignmentRepository, InMemoryDocumentRepository};
    use crate::domain::foundation::UserId;
    use crate::domain::review::{
        next_schedule, AssignmentStatus, Document, ReviewAssignment, ReviewInterval,
    };
    use crate::ports::AssignmentRepository as _;

    fn metadata() -> CommandMetadata {
        CommandMetadata::new(UserId::new("admin-1").unwrap())
    }

    #[tokio::test]
    async fn resets_assignments_and_clears_document_completion() {
        let author = UserId::new("author-1").unwrap();
        let reviewer = UserId::new("reviewer-1").unwrap();

        let mut document = Document::new(
            DocumentId::new(),
            author,
            "Quality Manual".to_string(),
            vec![reviewer.clone()],
            ReviewInterval::Monthly,
            None,
            None,
        )
        .unwrap();
        let now = Timestamp::now();
        let schedule = next_schedule(now, ReviewInterval::Monthly, None, None);
        document.complete_cycle(&schedule, now);
        let doc_id = document.id();

        let documents = Arc::new(InMemoryDocumentRepository::with_document(document));
        let assignments = Arc::new(InMemoryAssignmentRepository::new());

        let mut assignment = ReviewAssignment::new(doc_id, reviewer.clone(), None, None);
        assignment.set_status(AssignmentStatus::Completed, &reviewer, Timestamp::now());
        assignments.save(&assignment).await.unwrap();

        let handler = ResetReviewCycleHandler::new(assignments.clone(), documents.clone());
        let result = handler
            .handle(ResetReviewCycleCommand { document_id: doc_id }, metadata())
            .await
            .unwrap();

        assert_eq!(result.reset, 1);

        let stored = assignments
            .find_by_id(&assignment.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), AssignmentStatus::Pending);
        assert!(stored.completed_date().is_none());
        assert!(stored.completed_by().is_none());
        assert!(!stored.requires_updates());

        let doc = documents.get(&doc_id).await.unwrap();
        assert!(!doc.review_completed());
        assert!(doc.review_completed_at().is_none());
    }

    #[tokio::test]
    async fn fails_when_document_missing() {
        let handler = ResetReviewCycleHandler::new(
            Arc::new(InMemoryAssignmentRepository::new()),
            Arc::new(InMemoryDocumentRepository::new()),
        );

        let err = handler
            .handle(
                ResetReviewCycleCommand {
                    document_id: DocumentId::new(),
                },
                metadata(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ReviewError::DocumentNotFound(_)));
    }
}
