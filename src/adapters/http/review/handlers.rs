//! HTTP handlers for review cycle endpoints.
//!
//! The acting user is taken from the `x-user-id` header, which the
//! fronting gateway populates after authenticating the request.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};

use crate::application::handlers::review::{
    BeginReviewCycleCommand, BeginReviewCycleHandler, ForceCompleteReviewCommand,
    ForceCompleteReviewHandler, GetAssignmentsHandler, GetAssignmentsQuery,
    PurgeDuplicateAssignmentsCommand, PurgeDuplicateAssignmentsHandler,
    PurgeOrphanedAssignmentsCommand, PurgeOrphanedAssignmentsHandler, ResetReviewCycleCommand,
    ResetReviewCycleHandler, UpdateAssignmentStatusCommand, UpdateAssignmentStatusHandler,
};
use crate::domain::foundation::{AssignmentId, CommandMetadata, DocumentId, Timestamp, UserId};
use crate::domain::review::ReviewError;

use super::dto::{
    transition_to_str, AssignmentListResponse, AssignmentListingResponse, AssignmentResponse,
    BeginCycleRequest, BeginCycleResponse, ErrorResponse, ForceCompleteRequest,
    ForceCompleteResponse, PurgeResponse, ResetCycleResponse, UpdateStatusRequest,
    UpdateStatusResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ReviewHandlers {
    begin_handler: Arc<BeginReviewCycleHandler>,
    update_handler: Arc<UpdateAssignmentStatusHandler>,
    list_handler: Arc<GetAssignmentsHandler>,
    purge_orphaned_handler: Arc<PurgeOrphanedAssignmentsHandler>,
    purge_duplicates_handler: Arc<PurgeDuplicateAssignmentsHandler>,
    force_complete_handler: Arc<ForceCompleteReviewHandler>,
    reset_handler: Arc<ResetReviewCycleHandler>,
}

impl ReviewHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        begin_handler: Arc<BeginReviewCycleHandler>,
        update_handler: Arc<UpdateAssignmentStatusHandler>,
        list_handler: Arc<GetAssignmentsHandler>,
        purge_orphaned_handler: Arc<PurgeOrphanedAssignmentsHandler>,
        purge_duplicates_handler: Arc<PurgeDuplicateAssignmentsHandler>,
        force_complete_handler: Arc<ForceCompleteReviewHandler>,
        reset_handler: Arc<ResetReviewCycleHandler>,
    ) -> Self {
        Self {
            begin_handler,
            update_handler,
            list_handler,
            purge_orphaned_handler,
            purge_duplicates_handler,
            force_complete_handler,
            reset_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/documents/:id/review/begin - Start a review cycle
pub async fn begin_cycle(
    State(handlers): State<ReviewHandlers>,
    headers: HeaderMap,
    Path(document_id): Path<String>,
    Json(req): Json<BeginCycleRequest>,
) -> Response {
    let user = match acting_user(&headers) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let document_id = match parse_document_id(&document_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let due_date = match req.due_date.as_deref().map(parse_timestamp).transpose() {
        Ok(due) => due,
        Err(response) => return response,
    };

    let cmd = BeginReviewCycleCommand {
        document_id,
        due_date,
    };
    let metadata = CommandMetadata::new(user).with_source("api");

    match handlers.begin_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = BeginCycleResponse {
                created: result.created.iter().map(AssignmentResponse::from).collect(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_review_error(e),
    }
}

/// PATCH /api/assignments/:id/status - Update an assignment's status
pub async fn update_status(
    State(handlers): State<ReviewHandlers>,
    headers: HeaderMap,
    Path(assignment_id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Response {
    let user = match acting_user(&headers) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let assignment_id = match assignment_id.parse::<AssignmentId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid assignment ID")),
            )
                .into_response()
        }
    };

    let cmd = UpdateAssignmentStatusCommand {
        assignment_id,
        status: req.status,
        requires_updates: req.requires_updates,
        update_notes: req.update_notes,
    };
    let metadata = CommandMetadata::new(user).with_source("api");

    match handlers.update_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = UpdateStatusResponse {
                assignment: AssignmentResponse::from(&result.assignment),
                spawned_update_request: result
                    .spawned_update_request
                    .as_ref()
                    .map(AssignmentResponse::from),
                transition: transition_to_str(result.transition),
                document: (&result.document).into(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_review_error(e),
    }
}

/// GET /api/documents/:id/assignments - List authoritative assignments
pub async fn list_assignments(
    State(handlers): State<ReviewHandlers>,
    Path(document_id): Path<String>,
) -> Response {
    let document_id = match parse_document_id(&document_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetAssignmentsQuery { document_id };

    match handlers.list_handler.handle(query).await {
        Ok(result) => {
            let response = AssignmentListResponse {
                items: result
                    .assignments
                    .iter()
                    .map(AssignmentListingResponse::from)
                    .collect(),
                purged: result.purged,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_review_error(e),
    }
}

/// POST /api/documents/:id/review/purge-orphaned - Delete dangling records
pub async fn purge_orphaned(
    State(handlers): State<ReviewHandlers>,
    headers: HeaderMap,
    Path(document_id): Path<String>,
) -> Response {
    let user = match acting_user(&headers) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let document_id = match parse_document_id(&document_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = PurgeOrphanedAssignmentsCommand {
        document_id: Some(document_id),
    };
    let metadata = CommandMetadata::new(user).with_source("api");

    match handlers.purge_orphaned_handler.handle(cmd, metadata).await {
        Ok(result) => (
            StatusCode::OK,
            Json(PurgeResponse {
                deleted: result.deleted,
            }),
        )
            .into_response(),
        Err(e) => handle_review_error(e),
    }
}

/// POST /api/assignments/purge-orphaned - Delete dangling records store-wide
pub async fn purge_orphaned_all(
    State(handlers): State<ReviewHandlers>,
    headers: HeaderMap,
) -> Response {
    let user = match acting_user(&headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let cmd = PurgeOrphanedAssignmentsCommand { document_id: None };
    let metadata = CommandMetadata::new(user).with_source("api");

    match handlers.purge_orphaned_handler.handle(cmd, metadata).await {
        Ok(result) => (
            StatusCode::OK,
            Json(PurgeResponse {
                deleted: result.deleted,
            }),
        )
            .into_response(),
        Err(e) => handle_review_error(e),
    }
}

/// POST /api/documents/:id/review/purge-duplicates - Delete superseded records
pub async fn purge_duplicates(
    State(handlers): State<ReviewHandlers>,
    headers: HeaderMap,
    Path(document_id): Path<String>,
) -> Response {
    let user = match acting_user(&headers) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let document_id = match parse_document_id(&document_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = PurgeDuplicateAssignmentsCommand { document_id };
    let metadata = CommandMetadata::new(user).with_source("api");

    match handlers.purge_duplicates_handler.handle(cmd, metadata).await {
        Ok(result) => (
            StatusCode::OK,
            Json(PurgeResponse {
                deleted: result.deleted,
            }),
        )
            .into_response(),
        Err(e) => handle_review_error(e),
    }
}

/// POST /api/documents/:id/review/force-complete - Complete all assignments
pub async fn force_complete(
    State(handlers): State<ReviewHandlers>,
    headers: HeaderMap,
    Path(document_id): Path<String>,
    Json(req): Json<ForceCompleteRequest>,
) -> Response {
    let user = match acting_user(&headers) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let document_id = match parse_document_id(&document_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let completed_by = match UserId::new(req.completed_by) {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("completed_by cannot be empty")),
            )
                .into_response()
        }
    };

    let cmd = ForceCompleteReviewCommand {
        document_id,
        completed_by,
    };
    let metadata = CommandMetadata::new(user).with_source("api");

    match handlers.force_complete_handler.handle(cmd, metadata).await {
        Ok(result) => (
            StatusCode::OK,
            Json(ForceCompleteResponse {
                completed: result.completed,
                purged: result.purged,
            }),
        )
            .into_response(),
        Err(e) => handle_review_error(e),
    }
}

/// POST /api/documents/:id/review/reset - Reset the cycle to pending
pub async fn reset_cycle(
    State(handlers): State<ReviewHandlers>,
    headers: HeaderMap,
    Path(document_id): Path<String>,
) -> Response {
    let user = match acting_user(&headers) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let document_id = match parse_document_id(&document_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = ResetReviewCycleCommand { document_id };
    let metadata = CommandMetadata::new(user).with_source("api");

    match handlers.reset_handler.handle(cmd, metadata).await {
        Ok(result) => (
            StatusCode::OK,
            Json(ResetCycleResponse {
                reset: result.reset,
            }),
        )
            .into_response(),
        Err(e) => handle_review_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers and error handling
// ════════════════════════════════════════════════════════════════════════════

fn acting_user(headers: &HeaderMap) -> Result<UserId, Response> {
    let raw = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    UserId::new(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Missing x-user-id header")),
        )
            .into_response()
    })
}

fn parse_document_id(raw: &str) -> Result<DocumentId, Response> {
    raw.parse::<DocumentId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid document ID")),
        )
            .into_response()
    })
}

fn parse_timestamp(raw: &str) -> Result<Timestamp, Response> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| Timestamp::from_datetime(dt.with_timezone(&Utc)))
        .map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(
                    "Invalid RFC 3339 timestamp in due_date",
                )),
            )
                .into_response()
        })
}

fn handle_review_error(error: ReviewError) -> Response {
    match error {
        ReviewError::DocumentNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Document", &id.to_string())),
        )
            .into_response(),
        ReviewError::AssignmentNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Assignment", &id.to_string())),
        )
            .into_response(),
        ReviewError::Validation { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        ReviewError::Infrastructure(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}
