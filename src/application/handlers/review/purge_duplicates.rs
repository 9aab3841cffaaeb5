//! PurgeDuplicateAssignmentsHandler - maintenance operation.
//!
//! Applies the reconciler to one document and deletes every superseded
//! record, leaving exactly one assignment per assignee.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CommandMetadata, DocumentId};
use crate::domain::review::{reconcile, ReviewError};
use crate::ports::AssignmentRepository;

/// Command to purge superseded duplicates for a document.
#[derive(Debug, Clone)]
pub struct PurgeDuplicateAssignmentsCommand {
    pub document_id: DocumentId,
}

/// Result of the purge.
#[derive(Debug, Clone)]
pub struct PurgeDuplicateAssignmentsResult {
    pub deleted: u64,
    /// Records remaining after the purge.
    pub remaining: usize,
}

/// Handler for the duplicate purge.
pub struct PurgeDuplicateAssignmentsHandler {
    assignments: Arc<dyn AssignmentRepository>,
}

impl PurgeDuplicateAssignmentsHandler {
    pub fn new(assignments: Arc<dyn AssignmentRepository>) -> Self {
        Self { assignments }
    }

    pub async fn handle(
        &self,
        cmd: PurgeDuplicateAssignmentsCommand,
        metadata: CommandMetadata,
    ) -> Result<PurgeDuplicateAssignmentsResult, ReviewError> {
        let all = self.assignments.find_by_document(&cmd.document_id).await?;
        let reconciliation = reconcile(&all);

        let deleted = if reconciliation.stale_ids().is_empty() {
            0
        } else {
            self.assignments
                .delete_many(reconciliation.stale_ids())
                .await?
        };

        info!(
            document_id = %cmd.document_id,
            deleted,
            remaining = reconciliation.latest().len(),
            requested_by = %metadata.user_id,
            "Purged duplicate assignments"
        );

        Ok(PurgeDuplicateAssignmentsResult {
            deleted,
            remaining: reconciliation.latest().len(),
        })
    }
}
