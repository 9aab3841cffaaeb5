//! HTTP DTOs for review cycle endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::review::AssignmentListing;
use crate::domain::review::{AssignmentStatus, CompletionTransition, Document, ReviewAssignment};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start a review cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct BeginCycleRequest {
    /// RFC 3339 due date applied to every created assignment.
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Request to update an assignment's status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AssignmentStatus,
    #[serde(default)]
    pub requires_updates: bool,
    #[serde(default)]
    pub update_notes: Option<String>,
}

/// Request to force-complete a document's assignments.
#[derive(Debug, Clone, Deserialize)]
pub struct ForceCompleteRequest {
    pub completed_by: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A review assignment as exposed over the API.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentResponse {
    pub id: String,
    pub document_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub status: AssignmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<String>,
    pub requires_updates: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_assignment: Option<String>,
    pub created_at: String,
}

impl From<&ReviewAssignment> for AssignmentResponse {
    fn from(a: &ReviewAssignment) -> Self {
        Self {
            id: a.id().to_string(),
            document_id: a.document_id().to_string(),
            assignee: a.assignee().map(|u| u.as_str().to_string()),
            assigned_by: a.assigned_by().map(|u| u.as_str().to_string()),
            due_date: a.due_date().map(|t| t.as_datetime().to_rfc3339()),
            status: a.status(),
            completed_date: a.completed_date().map(|t| t.as_datetime().to_rfc3339()),
            completed_by: a.completed_by().map(|u| u.as_str().to_string()),
            requires_updates: a.requires_updates(),
            update_notes: a.update_notes().map(str::to_string),
            notes: a.notes().map(str::to_string),
            update_assignment: a.update_assignment().map(|id| id.to_string()),
            created_at: a.created_at().as_datetime().to_rfc3339(),
        }
    }
}

/// One listed assignment plus its relation to the current cycle.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentListingResponse {
    #[serde(flatten)]
    pub assignment: AssignmentResponse,
    pub in_current_cycle: bool,
}

impl From<&AssignmentListing> for AssignmentListingResponse {
    fn from(listing: &AssignmentListing) -> Self {
        Self {
            assignment: AssignmentResponse::from(&listing.assignment),
            in_current_cycle: listing.in_current_cycle,
        }
    }
}

/// Listing of a document's authoritative assignments.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentListResponse {
    pub items: Vec<AssignmentListingResponse>,
    /// Stale records purged while reading.
    pub purged: u64,
}

/// The document's review state after an operation.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReviewStateResponse {
    pub document_id: String,
    pub review_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_completed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_due_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opens_for_review: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_due_date: Option<String>,
}

impl From<&Document> for DocumentReviewStateResponse {
    fn from(doc: &Document) -> Self {
        Self {
            document_id: doc.id().to_string(),
            review_completed: doc.review_completed(),
            review_completed_at: doc
                .review_completed_at()
                .map(|t| t.as_datetime().to_rfc3339()),
            last_reviewed_on: doc.last_reviewed_on().map(|t| t.as_datetime().to_rfc3339()),
            next_review_due_on: doc
                .next_review_due_on()
                .map(|t| t.as_datetime().to_rfc3339()),
            opens_for_review: doc.opens_for_review().map(|t| t.as_datetime().to_rfc3339()),
            review_due_date: doc.review_due_date().map(|t| t.as_datetime().to_rfc3339()),
        }
    }
}

/// Response for a status update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateStatusResponse {
    pub assignment: AssignmentResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawned_update_request: Option<AssignmentResponse>,
    pub transition: &'static str,
    pub document: DocumentReviewStateResponse,
}

pub fn transition_to_str(transition: CompletionTransition) -> &'static str {
    match transition {
        CompletionTransition::Completed => "completed",
        CompletionTransition::Reopened => "reopened",
        CompletionTransition::Unchanged => "unchanged",
    }
}

/// Response for cycle entry.
#[derive(Debug, Clone, Serialize)]
pub struct BeginCycleResponse {
    pub created: Vec<AssignmentResponse>,
}

/// Response for purge operations.
#[derive(Debug, Clone, Serialize)]
pub struct PurgeResponse {
    pub deleted: u64,
}

/// Response for the force-complete operation.
#[derive(Debug, Clone, Serialize)]
pub struct ForceCompleteResponse {
    pub completed: usize,
    pub purged: u64,
}

/// Response for the cycle reset operation.
#[derive(Debug, Clone, Serialize)]
pub struct ResetCycleResponse {
    pub reset: usize,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}
