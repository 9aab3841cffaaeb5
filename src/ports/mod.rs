//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.

mod assignment_repository;
mod document_repository;
mod notification_sender;
mod user_reader;

pub use assignment_repository::AssignmentRepository;
pub use document_repository::DocumentRepository;
pub use notification_sender::{NotificationKind, NotificationSender, ReviewNotification};
pub use user_reader::{UserProfile, UserReader};
