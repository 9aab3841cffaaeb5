//! PurgeOrphanedAssignmentsHandler - maintenance operation.
//!
//! Deletes every assignment whose assignee reference is dangling,
//! optionally scoped to one document. Dangling references are expected
//! drift from user deletion, not a fault.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CommandMetadata, DocumentId};
use crate::domain::review::ReviewError;
use crate::ports::AssignmentRepository;

/// Command to purge dangling-assignee records.
#[derive(Debug, Clone)]
pub struct PurgeOrphanedAssignmentsCommand {
    /// Restrict the purge to one document; `None` purges store-wide.
    pub document_id: Option<DocumentId>,
}

/// Result of the purge.
#[derive(Debug, Clone)]
pub struct PurgeOrphanedAssignmentsResult {
    pub deleted: u64,
}

/// Handler for the orphan purge.
pub struct PurgeOrphanedAssignmentsHandler {
    assignments: Arc<dyn AssignmentRepository>,
}

impl PurgeOrphanedAssignmentsHandler {
    pub fn new(assignments: Arc<dyn AssignmentRepository>) -> Self {
        Self { assignments }
    }

    pub async fn handle(
        &self,
        cmd: PurgeOrphanedAssignmentsCommand,
        metadata: CommandMetadata,
    ) -> Result<PurgeOrphanedAssignmentsResult, ReviewError> {
        let deleted = self
            .assignments
            .delete_orphaned(cmd.document_id.as_ref())
            .await?;

        info!(
            document_id = ?cmd.document_id,
            deleted,
            requested_by = %metadata.user_id,
            "Purged orphaned assignments"
        );

        Ok(PurgeOrphanedAssignmentsResult { deleted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAssignmentRepository;
    use crate::domain::foundation::{AssignmentId, Timestamp, UserId};
    use crate::domain::review::{AssignmentStatus, ReviewAssignment};
    use crate::ports::AssignmentRepository as _;

    fn orphan(doc: DocumentId) -> ReviewAssignment {
        ReviewAssignment::reconstitute(
            AssignmentId::new(),
            doc,
            None,
            None,
            None,
            AssignmentStatus::Pending,
            None,
            None,
            false,
            None,
            None,
            None,
            Timestamp::now(),
        )
    }

    fn metadata() -> CommandMetadata {
        CommandMetadata::new(UserId::new("admin-1").unwrap())
    }

    #[tokio::test]
    async fn purges_only_dangling_records_in_scope() {
        let doc_a = DocumentId::new();
        let doc_b = DocumentId::new();

        let assignments = Arc::new(InMemoryAssignmentRepository::new());
        assignments.save(&orphan(doc_a)).await.unwrap();
        assignments.save(&orphan(doc_b)).await.unwrap();
        let valid =
            ReviewAssignment::new(doc_a, UserId::new("reviewer-1").unwrap(), None, None);
        assignments.save(&valid).await.unwrap();

        let handler = PurgeOrphanedAssignmentsHandler::new(assignments.clone());
        let result = handler
            .handle(
                PurgeOrphanedAssignmentsCommand {
                    document_id: Some(doc_a),
                },
                metadata(),
            )
            .await
            .unwrap();

        assert_eq!(result.deleted, 1);
        assert_eq!(assignments.len(), 2);
        assert!(assignments.find_by_id(&valid.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unscoped_purge_covers_all_documents() {
        let assignments = Arc::new(InMemoryAssignmentRepository::new());
        assignments.save(&orphan(DocumentId::new())).await.unwrap();
        assignments.save(&orphan(DocumentId::new())).await.unwrap();

        let handler = PurgeOrphanedAssignmentsHandler::new(assignments.clone());
        let result = handler
            .handle(
                PurgeOrphanedAssignmentsCommand { document_id: None },
                metadata(),
            )
            .await
            .unwrap();

        assert_eq!(result.deleted, 2);
        assert!(assignments.is_empty());
    }
}
