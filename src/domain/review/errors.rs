//! Review flow error taxonomy.
//!
//! Not-found aborts the operation; data-integrity drift (dangling or
//! removed assignees) is never an error here, the reconciler absorbs it.

use crate::domain::foundation::{AssignmentId, DocumentId, DomainError, ErrorCode};

/// Errors surfaced by review cycle operations.
#[derive(Debug, Clone)]
pub enum ReviewError {
    /// Referenced document does not exist.
    DocumentNotFound(DocumentId),
    /// Referenced assignment does not exist.
    AssignmentNotFound(AssignmentId),
    /// Request-level validation failure.
    Validation { field: String, message: String },
    /// Backing store or other unexpected failure.
    Infrastructure(String),
}

impl std::fmt::Display for ReviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewError::DocumentNotFound(id) => write!(f, "Document not found: {}", id),
            ReviewError::AssignmentNotFound(id) => write!(f, "Assignment not found: {}", id),
            ReviewError::Validation { field, message } => {
                write!(f, "Validation failed for {}: {}", field, message)
            }
            ReviewError::Infrastructure(msg) => write!(f, "Infrastructure error: {}", msg),
        }
    }
}

impl std::error::Error for ReviewError {}

impl From<DomainError> for ReviewError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => ReviewError::Validation {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ReviewError::Infrastructure(err.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_not_found_displays_id() {
        let id = DocumentId::new();
        let err = ReviewError::DocumentNotFound(id);
        assert!(format!("{}", err).contains(&id.to_string()));
    }

    #[test]
    fn validation_domain_error_maps_to_validation() {
        let err: ReviewError = DomainError::validation("status", "unknown value").into();
        match err {
            ReviewError::Validation { field, message } => {
                assert_eq!(field, "status");
                assert_eq!(message, "unknown value");
            }
            _ => panic!("Expected Validation"),
        }
    }

    #[test]
    fn database_domain_error_maps_to_infrastructure() {
        let err: ReviewError =
            DomainError::new(ErrorCode::DatabaseError, "connection refused").into();
        assert!(matches!(err, ReviewError::Infrastructure(_)));
    }
}
