//! Document store boundary.
//!
//! DESIGN
//! ======
//! A canvas is one document holding the sanitized scene in its `data` field
//! plus server-assigned timestamps. The store is reached through the
//! [`DocumentStore`] trait so the persistence service can run against
//! Postgres in production and [`memory::MemoryStore`] in tests and local dev.
//!
//! The operations mirror the store client the editor was written against:
//! `create` (new document, store-assigned id), `get`, `set` (create or
//! overwrite) and `update` (modify an existing document; fails with
//! [`StoreError::NotFound`] when it does not exist).

pub mod memory;
pub mod postgres;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Identifier of a canvas document.
pub type CanvasId = Uuid;

/// A stored canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// Sanitized scene, or `null` for a canvas that was never saved.
    pub data: Value,
    /// Unix milliseconds.
    pub created_at: i64,
    /// Unix milliseconds.
    pub updated_at: i64,
}

impl CanvasDocument {
    /// A freshly created canvas with no scene yet.
    #[must_use]
    pub fn empty(now: i64) -> Self {
        Self { data: Value::Null, created_at: now, updated_at: now }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("canvas not found: {0}")]
    NotFound(CanvasId),
    #[error("store rejected document: {0}")]
    Rejected(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Async document store holding canvases.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document under a store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Rejected`] if the data is not storable, or a
    /// database error.
    async fn create(&self, doc: CanvasDocument) -> Result<CanvasId, StoreError>;

    /// Fetch a document, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a database error if the read fails.
    async fn get(&self, id: CanvasId) -> Result<Option<CanvasDocument>, StoreError>;

    /// Create or overwrite the document at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Rejected`] if the data is not storable, or a
    /// database error.
    async fn set(&self, id: CanvasId, doc: CanvasDocument) -> Result<(), StoreError>;

    /// Replace `data` and `updated_at` of an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no document exists at `id`,
    /// [`StoreError::Rejected`] if the data is not storable, or a database
    /// error.
    async fn update(&self, id: CanvasId, data: Value, updated_at: i64) -> Result<(), StoreError>;
}

/// Reject values the store cannot hold: a sequence directly inside a sequence.
///
/// # Errors
///
/// Returns [`StoreError::Rejected`] naming the path of the first offending
/// sequence.
pub fn check_storable(value: &Value) -> Result<(), StoreError> {
    fn walk(value: &Value, path: &mut String) -> Result<(), StoreError> {
        match value {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let len = path.len();
                    path.push('/');
                    path.push_str(&index.to_string());
                    if item.is_array() {
                        return Err(StoreError::Rejected(format!("nested array at {path}")));
                    }
                    walk(item, path)?;
                    path.truncate(len);
                }
                Ok(())
            }
            Value::Object(fields) => {
                for (key, field) in fields {
                    let len = path.len();
                    path.push('/');
                    path.push_str(key);
                    walk(field, path)?;
                    path.truncate(len);
                }
                Ok(())
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(()),
        }
    }
    walk(value, &mut String::new())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
