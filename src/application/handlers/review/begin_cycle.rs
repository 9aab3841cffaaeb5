//! BeginReviewCycleHandler - Command handler for starting a review cycle.
//!
//! Creates one pending assignment per authoritative assignee and notifies
//! each reviewer (best-effort).

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{CommandMetadata, DocumentId, Timestamp};
use crate::domain::review::{ReviewAssignment, ReviewError};
use crate::ports::{
    AssignmentRepository, DocumentRepository, NotificationKind, NotificationSender,
    ReviewNotification,
};

/// Command to enter a document into a review cycle.
#[derive(Debug, Clone)]
pub struct BeginReviewCycleCommand {
    pub document_id: DocumentId,
    /// Due date applied to every created assignment, if any.
    pub due_date: Option<Timestamp>,
}

/// Result of starting a cycle.
#[derive(Debug, Clone)]
pub struct BeginReviewCycleResult {
    pub created: Vec<ReviewAssignment>,
}

/// Handler for review cycle entry.
pub struct BeginReviewCycleHandler {
    assignments: Arc<dyn AssignmentRepository>,
    documents: Arc<dyn DocumentRepository>,
    notifier: Arc<dyn NotificationSender>,
}

impl BeginReviewCycleHandler {
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        documents: Arc<dyn DocumentRepository>,
        notifier: Arc<dyn NotificationSender>,
    ) -> Self {
        Self {
            assignments,
            documents,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: BeginReviewCycleCommand,
        metadata: CommandMetadata,
    ) -> Result<BeginReviewCycleResult, ReviewError> {
        let document = self
            .documents
            .find_by_id(&cmd.document_id)
            .await?
            .ok_or(ReviewError::DocumentNotFound(cmd.document_id))?;

        if document.review_assignees().is_empty() {
            return Err(ReviewError::Validation {
                field: "review_assignees".to_string(),
                message: "Document has no reviewers configured".to_string(),
            });
        }

        let created: Vec<ReviewAssignment> = document
            .review_assignees()
            .iter()
            .map(|assignee| {
                ReviewAssignment::new(
                    document.id(),
                    assignee.clone(),
                    Some(metadata.user_id.clone()),
                    cmd.due_date,
                )
            })
            .collect();

        self.assignments.save_all(&created).await?;

        info!(
            document_id = %document.id(),
            count = created.len(),
            "Review cycle started"
        );

        for assignment in &created {
            if let Some(assignee) = assignment.assignee() {
                let notification = ReviewNotification {
                    kind: NotificationKind::ReviewAssigned,
                    document_id: document.id(),
                    document_title: document.title().to_string(),
                    message: format!("You have been assigned to review \"{}\"", document.title()),
                };
                if let Err(e) = self.notifier.send(assignee, &notification).await {
                    warn!(
                        document_id = %document.id(),
                        assignee = %assignee,
                        error = %e,
                        "Failed to notify reviewer of new assignment"
                    );
                }
            }
        }

        Ok(BeginReviewCycleResult { created })
    }
}
