//! GetAssignmentsHandler - reconcile-on-read listing.
//!
//! Returns the authoritative assignment set for a document, purging stale
//! duplicates and dangling-assignee records as a side effect.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::DocumentId;
use crate::domain::review::{reconcile, ReviewAssignment, ReviewError};
use crate::ports::{AssignmentRepository, DocumentRepository};

/// Query for a document's authoritative assignments.
#[derive(Debug, Clone)]
pub struct GetAssignmentsQuery {
    pub document_id: DocumentId,
}

/// One listed assignment with its relation to the current cycle.
#[derive(Debug, Clone)]
pub struct AssignmentListing {
    pub assignment: ReviewAssignment,
    /// False when the assignee is no longer on the document's reviewer
    /// list; such records don't count toward completion.
    pub in_current_cycle: bool,
}

/// Result of the listing query.
#[derive(Debug, Clone)]
pub struct GetAssignmentsResult {
    pub assignments: Vec<AssignmentListing>,
    /// Stale records purged while reading.
    pub purged: u64,
}

/// Handler for assignment listing.
pub struct GetAssignmentsHandler {
    assignments: Arc<dyn AssignmentRepository>,
    documents: Arc<dyn DocumentRepository>,
}

impl GetAssignmentsHandler {
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
        query: GetAssignmentsQuery,
    ) -> Result<GetAssignmentsResult, ReviewError> {
        let document = self
            .documents
            .find_by_id(&query.document_id)
            .await?
            .ok_or(ReviewError::DocumentNotFound(query.document_id))?;

        let all = self.assignments.find_by_document(&query.document_id).await?;
        let reconciliation = reconcile(&all);

        let purged = if reconciliation.stale_ids().is_empty() {
            0
        } else {
            let deleted = self
                .assignments
                .delete_many(reconciliation.stale_ids())
                .await?;
            debug!(
                document_id = %query.document_id,
                deleted,
                "Purged stale assignments on read"
            );
            deleted
        };

        let mut listings: Vec<AssignmentListing> = all
            .into_iter()
            .filter(|a| !reconciliation.stale_ids().contains(&a.id()))
            .map(|a| {
                let in_current_cycle = a
                    .assignee()
                    .map(|u| document.is_current_reviewer(u))
                    .unwrap_or(false);
                AssignmentListing {
                    assignment: a,
                    in_current_cycle,
                }
            })
            .collect();
        listings.sort_by(|a, b| b.assignment.created_at().cmp(&a.assignment.created_at()));

        Ok(GetAssignmentsResult {
            assignments: listings,
            purged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryAssignmentRepository, InMemoryDocumentRepository};
    use crate::domain::foundation::UserId;
    use crate::domain::review::{Document, ReviewInterval};
    use crate::ports::AssignmentRepository as _;

    fn reviewer(n: u32) -> UserId {
        UserId::new(format!("reviewer-{}", n)).unwrap()
    }

    fn test_document(reviewers: Vec<UserId>) -> Document {
        Document::new(
            DocumentId::new(),
            UserId::new("author-1").unwrap(),
            "Quality Manual".to_string(),
            reviewers,
            ReviewInterval::Monthly,
            None,
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn lists_authoritative_assignments_and_purges_duplicates() {
        let doc = test_document(vec![reviewer(1)]);
        let doc_id = doc.id();

        let assignments = Arc::new(InMemoryAssignmentRepository::new());
        let old = ReviewAssignment::new(doc_id, reviewer(1), None, None);
        assignments.save(&old).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let new = ReviewAssignment::new(doc_id, reviewer(1), None, None);
        assignments.save(&new).await.unwrap();

        let handler = GetAssignmentsHandler::new(
            assignments.clone(),
            Arc::new(InMemoryDocumentRepository::with_document(doc)),
        );

        let result = handler
            .handle(GetAssignmentsQuery { document_id: doc_id })
            .await
            .unwrap();

        assert_eq!(result.assignments.len(), 1);
        assert_eq!(result.assignments[0].assignment.id(), new.id());
        assert!(result.assignments[0].in_current_cycle);
        assert_eq!(result.purged, 1);
        assert_eq!(assignments.len(), 1);
    }

    #[tokio::test]
    async fn flags_assignments_outside_current_cycle() {
        let doc = test_document(vec![reviewer(1)]);
        let doc_id = doc.id();

        let assignments = Arc::new(InMemoryAssignmentRepository::new());
        assignments
            .save(&ReviewAssignment::new(doc_id, reviewer(1), None, None))
            .await
            .unwrap();
        assignments
            .save(&ReviewAssignment::new(doc_id, reviewer(2), None, None))
            .await
            .unwrap();

        let handler = GetAssignmentsHandler::new(
            assignments,
            Arc::new(InMemoryDocumentRepository::with_document(doc)),
        );

        let result = handler
            .handle(GetAssignmentsQuery { document_id: doc_id })
            .await
            .unwrap();

        assert_eq!(result.assignments.len(), 2);
        for listing in &result.assignments {
            let expected = listing.assignment.assignee() == Some(&reviewer(1));
            assert_eq!(listing.in_current_cycle, expected);
        }
    }

    #[tokio::test]
    async fn fails_when_document_missing() {
        let handler = GetAssignmentsHandler::new(
            Arc::new(InMemoryAssignmentRepository::new()),
            Arc::new(InMemoryDocumentRepository::new()),
        );

        let result = handler
            .handle(GetAssignmentsQuery {
                document_id: DocumentId::new(),
            })
            .await;

        assert!(matches!(result, Err(ReviewError::DocumentNotFound(_))));
    }
}
