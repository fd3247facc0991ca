//! Canvas document routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use serde_json::Value;
use storable::SceneValue;
use uuid::Uuid;

use crate::db::StoreError;
use crate::services::persistence::{self, PersistError, SaveOutcome};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CanvasResponse {
    pub id: Uuid,
    pub data: Value,
}

#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub id: Uuid,
    pub outcome: SaveOutcome,
}

/// Error body: `{"error": code, "message": text}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    fn not_found(id: Uuid) -> Self {
        Self { status: StatusCode::NOT_FOUND, code: "E_NOT_FOUND", message: format!("canvas not found: {id}") }
    }
}

impl From<PersistError> for ApiError {
    fn from(err: PersistError) -> Self {
        Self { status: persist_error_to_status(&err), code: err.error_code(), message: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.code, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

pub(crate) fn persist_error_to_status(err: &PersistError) -> StatusCode {
    match err {
        PersistError::Sanitize(_) | PersistError::Store(StoreError::Rejected(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        PersistError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
        PersistError::Store(StoreError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `POST /api/canvases`: create an empty canvas.
pub async fn create_canvas(State(state): State<AppState>) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = persistence::create_canvas(state.store.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// `GET /api/canvases/:id`: load the stored scene.
pub async fn get_canvas(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CanvasResponse>, ApiError> {
    let data = persistence::load_canvas(state.store.as_ref(), id, state.restore_on_load)
        .await?
        .ok_or_else(|| ApiError::not_found(id))?;
    Ok(Json(CanvasResponse { id, data }))
}

/// `PUT /api/canvases/:id`: sanitize and save the exported scene.
pub async fn save_canvas(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(scene): Json<Value>,
) -> Result<Json<SavedResponse>, ApiError> {
    let scene = SceneValue::from(scene);
    let outcome = persistence::save_canvas(state.store.as_ref(), state.sanitizer, id, &scene).await?;
    Ok(Json(SavedResponse { id, outcome }))
}

#[cfg(test)]
#[path = "canvases_test.rs"]
mod tests;
