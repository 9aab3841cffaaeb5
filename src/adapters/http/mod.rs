//! HTTP adapters - REST API implementations.

pub mod review;

pub use review::{review_routes, ReviewHandlers};
