//! PostgreSQL implementation of AssignmentRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    AssignmentId, DocumentId, DomainError, ErrorCode, Timestamp, UserId,
};
use crate::domain::review::{AssignmentStatus, ReviewAssignment};
use crate::ports::AssignmentRepository;

/// PostgreSQL implementation of AssignmentRepository.
#[derive(Clone)]
pub struct PostgresAssignmentRepository {
    pool: PgPool,
}

impl PostgresAssignmentRepository {
    /// Creates a new PostgresAssignmentRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentRepository for PostgresAssignmentRepository {
    async fn save(&self, assignment: &ReviewAssignment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO review_assignments (
                id, document_id, assignee, assigned_by, due_date, status,
                completed_date, completed_by, requires_updates, update_notes,
                notes, update_assignment, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(*assignment.id().as_uuid())
        .bind(*assignment.document_id().as_uuid())
        .bind(assignment.assignee().map(UserId::as_str))
        .bind(assignment.assigned_by().map(UserId::as_str))
        .bind(assignment.due_date().map(Timestamp::as_datetime))
        .bind(assignment.status().as_str())
        .bind(assignment.completed_date().map(Timestamp::as_datetime))
        .bind(assignment.completed_by().map(UserId::as_str))
        .bind(assignment.requires_updates())
        .bind(assignment.update_notes())
        .bind(assignment.notes())
        .bind(assignment.update_assignment().map(|id| *id.as_uuid()))
        .bind(assignment.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert assignment: {}", e),
            )
        })?;

        Ok(())
    }

    async fn save_all(&self, assignments: &[ReviewAssignment]) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })?;

        for assignment in assignments {
            sqlx::query(
                r#"
                INSERT INTO review_assignments (
                    id, document_id, assignee, assigned_by, due_date, status,
                    completed_date, completed_by, requires_updates, update_notes,
                    notes, update_assignment, created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                "#,
            )
            .bind(*assignment.id().as_uuid())
            .bind(*assignment.document_id().as_uuid())
            .bind(assignment.assignee().map(UserId::as_str))
            .bind(assignment.assigned_by().map(UserId::as_str))
            .bind(assignment.due_date().map(Timestamp::as_datetime))
            .bind(assignment.status().as_str())
            .bind(assignment.completed_date().map(Timestamp::as_datetime))
            .bind(assignment.completed_by().map(UserId::as_str))
            .bind(assignment.requires_updates())
            .bind(assignment.update_notes())
            .bind(assignment.notes())
            .bind(assignment.update_assignment().map(|id| *id.as_uuid()))
            .bind(assignment.created_at().as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to insert assignment: {}", e),
                )
            })?;
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit assignments: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, assignment: &ReviewAssignment) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE review_assignments SET
                status = $2,
                completed_date = $3,
                completed_by = $4,
                requires_updates = $5,
                update_notes = $6,
                notes = $7,
                update_assignment = $8
            WHERE id = $1
            "#,
        )
        .bind(*assignment.id().as_uuid())
        .bind(assignment.status().as_str())
        .bind(assignment.completed_date().map(Timestamp::as_datetime))
        .bind(assignment.completed_by().map(UserId::as_str))
        .bind(assignment.requires_updates())
        .bind(assignment.update_notes())
        .bind(assignment.notes())
        .bind(assignment.update_assignment().map(|id| *id.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update assignment: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AssignmentNotFound,
                format!("Assignment not found: {}", assignment.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &AssignmentId,
    ) -> Result<Option<ReviewAssignment>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, document_id, assignee, assigned_by, due_date, status,
                   completed_date, completed_by, requires_updates, update_notes,
                   notes, update_assignment, created_at
            FROM review_assignments
            WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch assignment: {}", e),
            )
        })?;

        row.map(row_to_assignment).transpose()
    }

    async fn find_by_document(
        &self,
        document_id: &DocumentId,
    ) -> Result<Vec<ReviewAssignment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, document_id, assignee, assigned_by, due_date, status,
                   completed_date, completed_by, requires_updates, update_notes,
                   notes, update_assignment, created_at
            FROM review_assignments
            WHERE document_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(*document_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch assignments by document: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_assignment).collect()
    }

    async fn delete_many(&self, ids: &[AssignmentId]) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let result = sqlx::query("DELETE FROM review_assignments WHERE id = ANY($1)")
            .bind(&uuids)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete assignments: {}", e),
                )
            })?;

        Ok(result.rows_affected())
    }

    async fn delete_orphaned(
        &self,
        document_id: Option<&DocumentId>,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM review_assignments
            WHERE assignee IS NULL
              AND ($1::uuid IS NULL OR document_id = $1)
            "#,
        )
        .bind(document_id.map(|id| *id.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to delete orphaned assignments: {}", e),
            )
        })?;

        Ok(result.rows_affected())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn column_err(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to get {}: {}", column, e),
    )
}

fn str_to_assignment_status(s: &str) -> Result<AssignmentStatus, DomainError> {
    AssignmentStatus::parse(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid assignment status: {}", s),
        )
    })
}

fn opt_user_id(value: Option<String>, column: &str) -> Result<Option<UserId>, DomainError> {
    value
        .map(|s| UserId::new(s).map_err(|e| column_err(column, e)))
        .transpose()
}

fn row_to_assignment(row: sqlx::postgres::PgRow) -> Result<ReviewAssignment, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_err("id", e))?;
    let document_id: uuid::Uuid = row
        .try_get("document_id")
        .map_err(|e| column_err("document_id", e))?;
    let assignee: Option<String> = row
        .try_get("assignee")
        .map_err(|e| column_err("assignee", e))?;
    let assigned_by: Option<String> = row
        .try_get("assigned_by")
        .map_err(|e| column_err("assigned_by", e))?;
    let due_date: Option<chrono::DateTime<chrono::Utc>> = row
        .try_get("due_date")
        .map_err(|e| column_err("due_date", e))?;
    let status_str: String = row.try_get("status").map_err(|e| column_err("status", e))?;
    let completed_date: Option<chrono::DateTime<chrono::Utc>> = row
        .try_get("completed_date")
        .map_err(|e| column_err("completed_date", e))?;
    let completed_by: Option<String> = row
        .try_get("completed_by")
        .map_err(|e| column_err("completed_by", e))?;
    let requires_updates: bool = row
        .try_get("requires_updates")
        .map_err(|e| column_err("requires_updates", e))?;
    let update_notes: Option<String> = row
        .try_get("update_notes")
        .map_err(|e| column_err("update_notes", e))?;
    let notes: Option<String> = row.try_get("notes").map_err(|e| column_err("notes", e))?;
    let update_assignment: Option<uuid::Uuid> = row
        .try_get("update_assignment")
        .map_err(|e| column_err("update_assignment", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| column_err("created_at", e))?;

    Ok(ReviewAssignment::reconstitute(
        AssignmentId::from_uuid(id),
        DocumentId::from_uuid(document_id),
        opt_user_id(assignee, "assignee")?,
        opt_user_id(assigned_by, "assigned_by")?,
        due_date.map(Timestamp::from_datetime),
        str_to_assignment_status(&status_str)?,
        completed_date.map(Timestamp::from_datetime),
        opt_user_id(completed_by, "completed_by")?,
        requires_updates,
        update_notes,
        notes,
        update_assignment.map(AssignmentId::from_uuid),
        Timestamp::from_datetime(created_at),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_status_conversion_roundtrips() {
        for status in [
            AssignmentStatus::Pending,
            AssignmentStatus::InProgress,
            AssignmentStatus::Completed,
            AssignmentStatus::Overdue,
        ] {
            assert_eq!(str_to_assignment_status(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn str_to_assignment_status_rejects_invalid() {
        assert!(str_to_assignment_status("cancelled").is_err());
    }
}
