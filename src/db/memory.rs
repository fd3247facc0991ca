//! In-memory document store for tests and local development.
//!
//! Enforces the same structural rule as the hosted store (no array directly
//! inside an array) so a write that skipped sanitization fails here too.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CanvasDocument, CanvasId, DocumentStore, StoreError, check_storable};

#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<HashMap<CanvasId, CanvasDocument>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, doc: CanvasDocument) -> Result<CanvasId, StoreError> {
        check_storable(&doc.data)?;
        let id = Uuid::new_v4();
        self.docs.write().await.insert(id, doc);
        Ok(id)
    }

    async fn get(&self, id: CanvasId) -> Result<Option<CanvasDocument>, StoreError> {
        Ok(self.docs.read().await.get(&id).cloned())
    }

    async fn set(&self, id: CanvasId, doc: CanvasDocument) -> Result<(), StoreError> {
        check_storable(&doc.data)?;
        self.docs.write().await.insert(id, doc);
        Ok(())
    }

    async fn update(&self, id: CanvasId, data: Value, updated_at: i64) -> Result<(), StoreError> {
        check_storable(&data)?;
        let mut docs = self.docs.write().await;
        let Some(doc) = docs.get_mut(&id) else {
            return Err(StoreError::NotFound(id));
        };
        doc.data = data;
        doc.updated_at = updated_at;
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
