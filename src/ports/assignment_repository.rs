//! Assignment repository port (write side).
//!
//! Defines the contract for persisting and retrieving review assignment
//! records. Implementations handle the actual database operations.
//!
//! # Design
//!
//! - **Record-oriented**: one row per (document, reviewer, cycle attempt)
//! - **Tolerant reads**: rows with dangling assignee references load as
//!   records with a null assignee; the reconciler purges them

use crate::domain::foundation::{AssignmentId, DocumentId, DomainError};
use crate::domain::review::ReviewAssignment;
use async_trait::async_trait;

/// Repository port for review assignment persistence.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Save a new assignment.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, assignment: &ReviewAssignment) -> Result<(), DomainError>;

    /// Save a batch of new assignments (cycle entry creates one per
    /// assignee).
    async fn save_all(&self, assignments: &[ReviewAssignment]) -> Result<(), DomainError>;

    /// Update an existing assignment.
    ///
    /// # Errors
    ///
    /// - `AssignmentNotFound` if the record doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, assignment: &ReviewAssignment) -> Result<(), DomainError>;

    /// Find an assignment by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &AssignmentId)
        -> Result<Option<ReviewAssignment>, DomainError>;

    /// Find all assignment records for a document, including superseded
    /// duplicates and dangling-assignee rows.
    async fn find_by_document(
        &self,
        document_id: &DocumentId,
    ) -> Result<Vec<ReviewAssignment>, DomainError>;

    /// Bulk-delete records by id, returning the count deleted.
    ///
    /// Deleting an already-absent id is not an error; reconciliation may
    /// race with itself.
    async fn delete_many(&self, ids: &[AssignmentId]) -> Result<u64, DomainError>;

    /// Delete every record with a null assignee, optionally scoped to one
    /// document. Returns the count deleted.
    async fn delete_orphaned(
        &self,
        document_id: Option<&DocumentId>,
    ) -> Result<u64, DomainError>;
}
