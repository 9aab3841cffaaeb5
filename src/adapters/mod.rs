//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - sqlx-backed store implementations
//! - `notification` - webhook delivery (plus an in-memory recorder)
//! - `memory` - in-memory stores used by tests and local tooling
//! - `http` - axum REST endpoints

pub mod http;
pub mod memory;
pub mod notification;
pub mod postgres;

pub use http::{review_routes, ReviewHandlers};
pub use notification::{InMemoryNotificationSender, WebhookNotificationSender};
pub use postgres::{
    PostgresAssignmentRepository, PostgresDocumentRepository, PostgresUserReader,
};
