//! In-memory AssignmentRepository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{AssignmentId, DocumentId, DomainError, ErrorCode};
use crate::domain::review::ReviewAssignment;
use crate::ports::AssignmentRepository;

/// HashMap-backed assignment store.
#[derive(Default)]
pub struct InMemoryAssignmentRepository {
    records: Mutex<HashMap<AssignmentId, ReviewAssignment>>,
}

impl InMemoryAssignmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn save(&self, assignment: &ReviewAssignment) -> Result<(), DomainError> {
        self.records
            .lock()
            .unwrap()
            .insert(assignment.id(), assignment.clone());
        Ok(())
    }

    async fn save_all(&self, assignments: &[ReviewAssignment]) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap();
        for assignment in assignments {
            records.insert(assignment.id(), assignment.clone());
        }
        Ok(())
    }

    async fn update(&self, assignment: &ReviewAssignment) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap();
        if !records.contains_key(&assignment.id()) {
            return Err(DomainError::new(
                ErrorCode::AssignmentNotFound,
                format!("Assignment not found: {}", assignment.id()),
            ));
        }
        records.insert(assignment.id(), assignment.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &AssignmentId,
    ) -> Result<Option<ReviewAssignment>, DomainError> {
        Ok(self.records.lock().unwrap().get(id).cloned())
    }

    async fn find_by_document(
        &self,
        document_id: &DocumentId,
    ) -> Result<Vec<ReviewAssignment>, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.document_id() == *document_id)
            .cloned()
            .collect())
    }

    async fn delete_many(&self, ids: &[AssignmentId]) -> Result<u64, DomainError> {
        let mut records = self.records.lock().unwrap();
        let mut deleted = 0;
        for id in ids {
            if records.remove(id).is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    async fn delete_orphaned(
        &self,
        document_id: Option<&DocumentId>,
    ) -> Result<u64, DomainError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|_, a| {
            let in_scope = document_id.map_or(true, |d| a.document_id() == *d);
            !(in_scope && a.assignee().is_none())
        });
        Ok((before - records.len()) as u64)
    }
}
