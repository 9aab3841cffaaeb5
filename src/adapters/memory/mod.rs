//! In-memory implementations of the store ports.
//!
//! Used by unit and integration tests, and by local development without a
//! database. Not suitable for multi-process deployments.

mod assignment_repository;
mod document_repository;
mod user_reader;

pub use assignment_repository::InMemoryAssignmentRepository;
pub use document_repository::InMemoryDocumentRepository;
pub use user_reader::InMemoryUserReader;
