//! User lookup port.
//!
//! Used only to resolve author/assignee/reviewer identity for notification
//! content. A deleted user is `None`, never an error.

use crate::domain::foundation::{DomainError, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Minimal identity view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    pub email: Option<String>,
}

/// Read-only user lookup.
#[async_trait]
pub trait UserReader: Send + Sync {
    /// Look up a user by id. Returns `None` for deleted/unknown users.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError>;
}
