//! In-memory NotificationSender for tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{NotificationSender, ReviewNotification};

/// Records every delivery; can be told to fail the next send to exercise
/// best-effort handling in callers.
#[derive(Default)]
pub struct InMemoryNotificationSender {
    sent: Mutex<Vec<(UserId, ReviewNotification)>>,
    fail_next: AtomicBool,
}

impl InMemoryNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded deliveries.
    pub fn sent(&self) -> Vec<(UserId, ReviewNotification)> {
        self.sent.lock().unwrap().clone()
    }

    /// Makes the next `send` call fail.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl NotificationSender for InMemoryNotificationSender {
    async fn send(
        &self,
        recipient: &UserId,
        notification: &ReviewNotification,
    ) -> Result<(), DomainError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::NotificationError,
                "Simulated notification failure",
            ));
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient.clone(), notification.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DocumentId;
    use crate::ports::NotificationKind;

    fn notification() -> ReviewNotification {
        ReviewNotification {
            kind: NotificationKind::UpdateRequested,
            document_id: DocumentId::new(),
            document_title: "Doc".to_string(),
            message: "msg".to_string(),
        }
    }

    #[tokio::test]
    async fn records_deliveries() {
        let sender = InMemoryNotificationSender::new();
        let recipient = UserId::new("user-1").unwrap();

        sender.send(&recipient, &notification()).await.unwrap();

        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, recipient);
    }

    #[tokio::test]
    async fn fail_next_fails_once() {
        let sender = InMemoryNotificationSender::new();
        let recipient = UserId::new("user-1").unwrap();
        sender.fail_next();

        assert!(sender.send(&recipient, &notification()).await.is_err());
        assert!(sender.send(&recipient, &notification()).await.is_ok());
        assert_eq!(sender.sent().len(), 1);
    }
}
