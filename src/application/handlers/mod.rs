//! Command and query handlers, grouped by flow.

pub mod review;
