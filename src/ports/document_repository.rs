//! Document repository port, restricted to review bookkeeping.
//!
//! Document content, file storage, and categorization are owned elsewhere;
//! this core only reads documents and writes their review fields.

use crate::domain::foundation::{DocumentId, DomainError};
use crate::domain::review::Document;
use async_trait::async_trait;

/// Repository port for document review-state persistence.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Find a document by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, DomainError>;

    /// Atomically update the document's review bookkeeping fields
    /// (completion flags, schedule dates). Non-review fields are untouched.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` if the document doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_review_state(&self, document: &Document) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn DocumentRepository) {}
    }
}
