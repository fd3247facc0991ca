//! Persistence service: create, load and save canvas documents.
//!
//! DESIGN
//! ======
//! Saving sanitizes the exported scene, then updates the existing document.
//! If the store reports that the document does not exist, the save is retried
//! exactly once as a full create (`set`) with fresh timestamps. Loading hands
//! the stored tree back unmodified unless the caller asks for nested
//! sequences to be restored.
//!
//! ERROR HANDLING
//! ==============
//! Sanitization runs before any store call, so a scene that cannot be stored
//! leaves the previously persisted document untouched. Store failures other
//! than not-found are surfaced to the caller unchanged.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::Value;
use storable::{SanitizeError, Sanitizer, SceneValue};
use tracing::{error, info, warn};

use crate::db::{CanvasDocument, CanvasId, DocumentStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("scene cannot be stored: {0}")]
    Sanitize(#[from] SanitizeError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PersistError {
    /// Stable machine-readable code for API error bodies.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Sanitize(_) => "E_SANITIZE",
            Self::Store(StoreError::NotFound(_)) => "E_NOT_FOUND",
            Self::Store(StoreError::Rejected(_)) => "E_REJECTED",
            Self::Store(StoreError::Database(_)) => "E_DATABASE",
        }
    }
}

/// How a save reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveOutcome {
    /// The existing document was updated.
    Updated,
    /// No document existed; a new one was written.
    Created,
}

pub(crate) fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

/// Create an empty canvas and return its id.
///
/// # Errors
///
/// Returns [`PersistError::Store`] if the store write fails.
pub async fn create_canvas(store: &dyn DocumentStore) -> Result<CanvasId, PersistError> {
    let id = store.create(CanvasDocument::empty(now_ms())).await?;
    info!(canvas_id = %id, "canvas created");
    Ok(id)
}

/// Sanitize `scene` and write it as the canvas's data.
///
/// # Errors
///
/// Returns [`PersistError::Sanitize`] if the scene holds values the store
/// cannot represent (nothing is written), or [`PersistError::Store`] if the
/// write fails for any reason other than a missing document.
pub async fn save_canvas(
    store: &dyn DocumentStore,
    sanitizer: Sanitizer,
    id: CanvasId,
    scene: &SceneValue,
) -> Result<SaveOutcome, PersistError> {
    let data = match sanitizer.sanitize(scene) {
        Ok(clean) => clean.into_json(),
        Err(e) => {
            error!(canvas_id = %id, error = %e, "save failed: scene not storable");
            return Err(e.into());
        }
    };

    let now = now_ms();
    match store.update(id, data.clone(), now).await {
        Ok(()) => {
            info!(canvas_id = %id, "canvas saved");
            Ok(SaveOutcome::Updated)
        }
        Err(StoreError::NotFound(_)) => {
            warn!(canvas_id = %id, "canvas document missing; creating");
            let doc = CanvasDocument { data, created_at: now, updated_at: now };
            if let Err(e) = store.set(id, doc).await {
                error!(canvas_id = %id, error = %e, "save failed on create");
                return Err(e.into());
            }
            info!(canvas_id = %id, "canvas created and saved");
            Ok(SaveOutcome::Created)
        }
        Err(e) => {
            error!(canvas_id = %id, error = %e, "save failed");
            Err(e.into())
        }
    }
}

/// Load the stored scene for a canvas. `None` if the canvas does not exist.
///
/// With `restore`, `item_N` mappings produced by sanitization are turned back
/// into nested sequences.
///
/// # Errors
///
/// Returns [`PersistError::Store`] if the read fails.
pub async fn load_canvas(store: &dyn DocumentStore, id: CanvasId, restore: bool) -> Result<Option<Value>, PersistError> {
    let Some(doc) = store.get(id).await? else {
        info!(canvas_id = %id, "canvas not found");
        return Ok(None);
    };
    if restore {
        return Ok(Some(storable::restore_json(&doc.data)));
    }
    Ok(Some(doc.data))
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
