//! PostgreSQL implementation of DocumentRepository.
//!
//! Reads the full review view of a document and writes back only the
//! review bookkeeping columns, leaving content fields untouched.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DocumentId, DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::review::{Document, ReviewInterval, ReviewPeriod};
use crate::ports::DocumentRepository;

/// PostgreSQL implementation of DocumentRepository.
#[derive(Clone)]
pub struct PostgresDocumentRepository {
    pool: PgPool,
}

impl PostgresDocumentRepository {
    /// Creates a new PostgresDocumentRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, author, title, review_assignees, review_completed,
                   review_completed_at, last_reviewed_on, next_review_due_on,
                   opens_for_review, review_due_date, review_interval,
                   review_interval_days, review_period, updated_at
            FROM documents
            WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch document: {}", e),
            )
        })?;

        row.map(row_to_document).transpose()
    }

    async fn update_review_state(&self, document: &Document) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE documents SET
                review_assignees = $2,
                review_completed = $3,
                review_completed_at = $4,
                last_reviewed_on = $5,
                next_review_due_on = $6,
                opens_for_review = $7,
                review_due_date = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(*document.id().as_uuid())
        .bind(
            document
                .review_assignees()
                .iter()
                .map(|u| u.as_str().to_string())
                .collect::<Vec<String>>(),
        )
        .bind(document.review_completed())
        .bind(document.review_completed_at().map(Timestamp::as_datetime))
        .bind(document.last_reviewed_on().map(Timestamp::as_datetime))
        .bind(document.next_review_due_on().map(Timestamp::as_datetime))
        .bind(document.opens_for_review().map(Timestamp::as_datetime))
        .bind(document.review_due_date().map(Timestamp::as_datetime))
        .bind(document.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update document review state: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DocumentNotFound,
                format!("Document not found: {}", document.id()),
            ));
        }

        Ok(())
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

fn str_to_interval(s: &str) -> Result<ReviewInterval, DomainError> {
    ReviewInterval::parse(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid review interval: {}", s),
        )
    })
}

/// Negative stored values are treated as unconfigured, yielding a
/// null schedule rather than a wrapped day count.
fn interval_days_from_column(days: Option<i32>) -> Option<u32> {
    days.and_then(|d| u32::try_from(d).ok())
}

fn str_to_period(s: &str) -> Result<ReviewPeriod, DomainError> {
    ReviewPeriod::parse(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid review period: {}", s),
        )
    })
}

fn row_to_document(row: sqlx::postgres::PgRow) -> Result<Document, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_err("id", e))?;
    let author: String = row.try_get("author").map_err(|e| column_err("author", e))?;
    let title: String = row.try_get("title").map_err(|e| column_err("title", e))?;
    let assignee_strs: Vec<String> = row
        .try_get("review_assignees")
        .map_err(|e| column_err("review_assignees", e))?;
    let review_completed: bool = row
        .try_get("review_completed")
        .map_err(|e| column_err("review_completed", e))?;
    let review_completed_at: Option<chrono::DateTime<chrono::Utc>> = row
        .try_get("review_completed_at")
        .map_err(|e| column_err("review_completed_at", e))?;
    let last_reviewed_on: Option<chrono::DateTime<chrono::Utc>> = row
        .try_get("last_reviewed_on")
        .map_err(|e| column_err("last_reviewed_on", e))?;
    let next_review_due_on: Option<chrono::DateTime<chrono::Utc>> = row
        .try_get("next_review_due_on")
        .map_err(|e| column_err("next_review_due_on", e))?;
    let opens_for_review: Option<chrono::DateTime<chrono::Utc>> = row
        .try_get("opens_for_review")
        .map_err(|e| column_err("opens_for_review", e))?;
    let review_due_date: Option<chrono::DateTime<chrono::Utc>> = row
        .try_get("review_due_date")
        .map_err(|e| column_err("review_due_date", e))?;
    let interval_str: String = row
        .try_get("review_interval")
        .map_err(|e| column_err("review_interval", e))?;
    let review_interval_days: Option<i32> = row
        .try_get("review_interval_days")
        .map_err(|e| column_err("review_interval_days", e))?;
    let period_str: Option<String> = row
        .try_get("review_period")
        .map_err(|e| column_err("review_period", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| column_err("updated_at", e))?;

    let author = UserId::new(author).map_err(|e| column_err("author", e))?;
    // Blank entries can appear from legacy rows; skipping them here keeps
    // the reviewer list usable rather than failing the whole read.
    let review_assignees: Vec<UserId> = assignee_strs
        .into_iter()
        .filter_map(|s| UserId::new(s).ok())
        .collect();

    Ok(Document::reconstitute(
        DocumentId::from_uuid(id),
        author,
        title,
        review_assignees,
        review_completed,
        review_completed_at.map(Timestamp::from_datetime),
        last_reviewed_on.map(Timestamp::from_datetime),
        next_review_due_on.map(Timestamp::from_datetime),
        opens_for_review.map(Timestamp::from_datetime),
        review_due_date.map(Timestamp::from_datetime),
        str_to_interval(&interval_str)?,
        interval_days_from_column(review_interval_days),
        period_str.as_deref().map(str_to_period).transpose()?,
        Timestamp::from_datetime(updated_at),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_conversion_roundtrips() {
        for interval in [
            ReviewInterval::Monthly,
            ReviewInterval::Quarterly,
            ReviewInterval::Semiannually,
            ReviewInterval::Annually,
            ReviewInterval::Custom,
        ] {
            assert_eq!(str_to_interval(interval.as_str()).unwrap(), interval);
        }
    }

    #[test]
    fn period_conversion_roundtrips() {
        for period in [
            ReviewPeriod::OneWeek,
            ReviewPeriod::TwoWeeks,
            ReviewPeriod::ThreeWeeks,
            ReviewPeriod::OneMonth,
        ] {
            assert_eq!(str_to_period(period.as_str()).unwrap(), period);
        }
    }

    #[test]
    fn invalid_interval_is_rejected() {
        assert!(str_to_interval("weekly").is_err());
    }

    #[test]
    fn negative_interval_days_read_as_unconfigured() {
        assert_eq!(interval_days_from_column(Some(30)), Some(30));
        assert_eq!(interval_days_from_column(Some(-45)), None);
        assert_eq!(interval_days_from_column(None), None);
    }
}
