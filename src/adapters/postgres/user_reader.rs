//! PostgreSQL implementation of UserReader.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{UserProfile, UserReader};

/// PostgreSQL implementation of UserReader.
#[derive(Clone)]
pub struct PostgresUserReader {
    pool: PgPool,
}

impl PostgresUserReader {
    /// Creates a new PostgresUserReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserReader for PostgresUserReader {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, display_name, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch user: {}", e),
            )
        })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: String = row.try_get("id").map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
        })?;
        let display_name: String = row.try_get("display_name").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get display_name: {}", e),
            )
        })?;
        let email: Option<String> = row.try_get("email").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get email: {}", e),
            )
        })?;

        let id = UserId::new(id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e))
        })?;

        Ok(Some(UserProfile {
            id,
            display_name,
            email,
        }))
    }
}
