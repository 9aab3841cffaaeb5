//! PostgreSQL adapters implementing the store ports with sqlx.

mod assignment_repository;
mod document_repository;
mod user_reader;

pub use assignment_repository::PostgresAssignmentRepository;
pub use document_repository::PostgresDocumentRepository;
pub use user_reader::PostgresUserReader;
