//! HTTP routes for review cycle endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{
    begin_cycle, force_complete, list_assignments, purge_duplicates, purge_orphaned,
    purge_orphaned_all, reset_cycle, update_status, ReviewHandlers,
};

/// Creates the review router with all endpoints.
pub fn review_routes(handlers: ReviewHandlers) -> Router {
    Router::new()
        .route("/documents/:id/review/begin", post(begin_cycle))
        .route("/documents/:id/assignments", get(list_assignments))
        .route("/documents/:id/review/purge-orphaned", post(purge_orphaned))
        .route(
            "/documents/:id/review/purge-duplicates",
            post(purge_duplicates),
        )
        .route("/documents/:id/review/force-complete", post(force_complete))
        .route("/documents/:id/review/reset", post(reset_cycle))
        .route("/assignments/:id/status", patch(update_status))
        .route("/assignments/purge-orphaned", post(purge_orphaned_all))
        .with_state(handlers)
}
