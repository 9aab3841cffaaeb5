//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `review` - Review cycle engine (reconciliation, completion, recurrence)

pub mod foundation;
pub mod review;
