//! Notification configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Notification webhook configuration.
///
/// Delivery is optional: with no URL configured the sender becomes a
/// no-op and review flows proceed without notifications.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Webhook endpoint receiving review notifications
    pub webhook_url: Option<String>,

    /// Delivery timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl NotificationConfig {
    /// Validate notification configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.webhook_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidWebhookUrl);
            }
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidNotificationTimeout);
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}
