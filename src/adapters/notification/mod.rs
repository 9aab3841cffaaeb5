//! Notification adapters.
//!
//! `WebhookNotificationSender` posts JSON to a configured endpoint;
//! `InMemoryNotificationSender` records deliveries for tests.

mod in_memory;
mod webhook;

pub use in_memory::InMemoryNotificationSender;
pub use webhook::WebhookNotificationSender;
