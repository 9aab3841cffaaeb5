//! Review cycle engine.
//!
//! The rules governing how a document's recurring review is tracked to
//! completion and rescheduled:
//!
//! - `assignment` - per-reviewer assignment records and resolution
//! - `document` - the document's review bookkeeping aggregate
//! - `reconciler` - latest-wins collapse of duplicate/orphaned records
//! - `completion` - document-level completion evaluation
//! - `schedule` - next-cycle recurrence computation
//! - `errors` - flow-level error taxonomy

pub mod assignment;
pub mod completion;
pub mod document;
pub mod errors;
pub mod reconciler;
pub mod schedule;

pub use assignment::{
    AssignmentStatus, ResolvedAssignment, ReviewAssignment, DEFAULT_UPDATE_NOTES,
    UPDATE_REQUEST_DUE_DAYS,
};
pub use completion::{cycle_complete, evaluate_transition, CompletionTransition};
pub use document::{Document, ReviewInterval, ReviewPeriod};
pub use errors::ReviewError;
pub use reconciler::{reconcile, Reconciliation};
pub use schedule::{next_schedule, ReviewSchedule};
