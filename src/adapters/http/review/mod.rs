//! HTTP adapter for review cycle endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ReviewHandlers;
pub use routes::review_routes;
