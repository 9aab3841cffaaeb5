//! In-memory UserReader.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{UserProfile, UserReader};

/// HashMap-backed user lookup. Unknown users resolve to `None`, matching
/// the deleted-user tolerance the port requires.
#[derive(Default)]
pub struct InMemoryUserReader {
    users: Mutex<HashMap<UserId, UserProfile>>,
}

impl InMemoryUserReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a user profile.
    pub fn insert(&self, profile: UserProfile) {
        self.users.lock().unwrap().insert(profile.id.clone(), profile);
    }
}

#[async_trait]
impl UserReader for InMemoryUserReader {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }
}
