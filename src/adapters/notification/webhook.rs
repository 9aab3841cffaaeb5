//! Webhook NotificationSender.
//!
//! Posts the notification payload as JSON to a configured endpoint. The
//! delivery contract is best-effort; callers treat errors as log-and-continue.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::config::NotificationConfig;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{NotificationSender, ReviewNotification};

/// HTTP webhook delivery of review notifications.
pub struct WebhookNotificationSender {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    recipient: &'a str,
    #[serde(flatten)]
    notification: &'a ReviewNotification,
}

impl WebhookNotificationSender {
    /// Creates a sender from configuration.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the HTTP client cannot be constructed
    pub fn from_config(config: &NotificationConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to build notification client: {}", e),
                )
            })?;

        Ok(Self {
            client,
            endpoint: config.webhook_url.clone().unwrap_or_default(),
        })
    }
}

#[async_trait]
impl NotificationSender for WebhookNotificationSender {
    async fn send(
        &self,
        recipient: &UserId,
        notification: &ReviewNotification,
    ) -> Result<(), DomainError> {
        if self.endpoint.is_empty() {
            // Delivery disabled; treat as delivered
            return Ok(());
        }

        let payload = WebhookPayload {
            recipient: recipient.as_str(),
            notification,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::NotificationError,
                    format!("Notification delivery failed: {}", e),
                )
            })?;

        if !response.status().is_success() {
            return Err(DomainError::new(
                ErrorCode::NotificationError,
                format!("Notification endpoint returned {}", response.status()),
            ));
        }

        Ok(())
    }
}
