//! In-memory DocumentRepository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DocumentId, DomainError, ErrorCode};
use crate::domain::review::Document;
use crate::ports::DocumentRepository;

/// HashMap-backed document store.
#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: Mutex<HashMap<DocumentId, Document>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one document.
    pub fn with_document(document: Document) -> Self {
        let store = Self::new();
        store
            .documents
            .lock()
            .unwrap()
            .insert(document.id(), document);
        store
    }

    /// Inserts or replaces a document.
    pub fn insert(&self, document: Document) {
        self.documents
            .lock()
            .unwrap()
            .insert(document.id(), document);
    }

    /// Test helper: read a stored document directly.
    pub async fn get(&self, id: &DocumentId) -> Option<Document> {
        self.documents.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, DomainError> {
        Ok(self.documents.lock().unwrap().get(id).cloned())
    }

    async fn update_review_state(&self, document: &Document) -> Result<(), DomainError> {
        let mut documents = self.documents.lock().unwrap();
        if !documents.contains_key(&document.id()) {
            return Err(DomainError::new(
                ErrorCode::DocumentNotFound,
                format!("Document not found: {}", document.id()),
            ));
        }
        documents.insert(document.id(), document.clone());
        Ok(())
    }
}
