//! Review cycle command handlers.
//!
//! One handler per operation. Each reconciles assignment state before
//! acting so that duplicate and dangling records never influence a
//! decision.

pub mod begin_cycle;
pub mod force_complete;
pub mod get_assignments;
pub mod purge_duplicates;
pub mod purge_orphaned;
pub mod reset_cycle;
pub mod update_status;

pub use begin_cycle::{BeginReviewCycleCommand, BeginReviewCycleHandler, BeginReviewCycleResult};
pub use force_complete::{
    ForceCompleteReviewCommand, ForceCompleteReviewHandler, ForceCompleteReviewResult,
};
pub use get_assignments::{
    AssignmentListing, GetAssignmentsHandler, GetAssignmentsQuery, GetAssignmentsResult,
};
pub use purge_duplicates::{
    PurgeDuplicateAssignmentsCommand, PurgeDuplicateAssignmentsHandler,
    PurgeDuplicateAssignmentsResult,
};
pub use purge_orphaned::{
    PurgeOrphanedAssignmentsCommand, PurgeOrphanedAssignmentsHandler,
    PurgeOrphanedAssignmentsResult,
};
pub use reset_cycle::{ResetReviewCycleCommand, ResetReviewCycleHandler, ResetReviewCycleResult};
pub use update_status::{
    UpdateAssignmentStatusCommand, UpdateAssignmentStatusHandler, UpdateAssignmentStatusResult,
};
