//! Notification sender port.
//!
//! Best-effort delivery: callers log failures and continue. A notification
//! error must never roll back or fail the primary operation.

use crate::domain::foundation::{DocumentId, DomainError, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A reviewer flagged the document as needing changes.
    UpdateRequested,
    /// A reviewer was assigned to a new review cycle.
    ReviewAssigned,
}

/// Context delivered with a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewNotification {
    pub kind: NotificationKind,
    pub document_id: DocumentId,
    pub document_title: String,
    pub message: String,
}

/// Best-effort notification delivery.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Deliver a notification to one recipient.
    ///
    /// # Errors
    ///
    /// - `NotificationError` on delivery failure; callers log and continue
    async fn send(
        &self,
        recipient: &UserId,
        notification: &ReviewNotification,
    ) -> Result<(), DomainError>;
}
