use serde_json::json;

use super::*;
use crate::state::test_helpers::test_app_state;

#[test]
fn persist_error_to_status_maps_each_kind() {
    let sanitize = PersistError::Sanitize(storable::SanitizeError::TooDeep { path: "/".into(), max_depth: 1 });
    assert_eq!(persist_error_to_status(&sanitize), StatusCode::UNPROCESSABLE_ENTITY);
    let missing = PersistError::Store(StoreError::NotFound(Uuid::nil()));
    assert_eq!(persist_error_to_status(&missing), StatusCode::NOT_FOUND);
    let rejected = PersistError::Store(StoreError::Rejected("x".into()));
    assert_eq!(persist_error_to_status(&rejected), StatusCode::UNPROCESSABLE_ENTITY);
    let db = PersistError::Store(StoreError::Database(sqlx::Error::PoolTimedOut));
    assert_eq!(persist_error_to_status(&db), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn api_error_carries_code_and_message() {
    let err = ApiError::from(PersistError::Store(StoreError::Rejected("nested array at /0".into())));
    assert_eq!(err.code, "E_REJECTED");
    assert_eq!(err.message, "store rejected document: nested array at /0");
    assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_then_get_returns_null_scene() {
    let state = test_app_state();
    let (status, Json(created)) = create_canvas(State(state.clone())).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let Json(loaded) = get_canvas(State(state), Path(created.id)).await.unwrap();
    assert_eq!(loaded.id, created.id);
    assert_eq!(loaded.data, Value::Null);
}

#[tokio::test]
async fn get_missing_canvas_is_404() {
    let err = get_canvas(State(test_app_state()), Path(Uuid::new_v4())).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.code, "E_NOT_FOUND");
}

#[tokio::test]
async fn save_then_get_returns_sanitized_scene() {
    let state = test_app_state();
    let (_, Json(created)) = create_canvas(State(state.clone())).await.unwrap();
    let scene = json!({"objects": [{"type": "path", "path": [["M", 0, 0], ["L", 5, 5]]}]});

    let Json(saved) = save_canvas(State(state.clone()), Path(created.id), Json(scene)).await.unwrap();
    assert_eq!(saved.outcome, SaveOutcome::Updated);

    let Json(loaded) = get_canvas(State(state), Path(created.id)).await.unwrap();
    assert_eq!(loaded.data["objects"][0]["path"], json!({"item_0": ["M", 0, 0], "item_1": ["L", 5, 5]}));
}

#[tokio::test]
async fn save_unknown_canvas_creates_it() {
    let state = test_app_state();
    let id = Uuid::new_v4();
    let Json(saved) = save_canvas(State(state.clone()), Path(id), Json(json!({"objects": []}))).await.unwrap();
    assert_eq!(saved.outcome, SaveOutcome::Created);
    assert!(get_canvas(State(state), Path(id)).await.is_ok());
}

#[tokio::test]
async fn get_restores_sequences_when_configured() {
    let mut state = test_app_state();
    state.restore_on_load = true;
    let id = Uuid::new_v4();
    let scene = json!({"path": [[0, 0], [1, 1]]});
    save_canvas(State(state.clone()), Path(id), Json(scene.clone())).await.unwrap();

    let Json(loaded) = get_canvas(State(state), Path(id)).await.unwrap();
    assert_eq!(loaded.data, scene);
}

#[tokio::test]
async fn save_too_deep_scene_is_422() {
    let mut state = test_app_state();
    state.sanitizer = storable::Sanitizer::new(1);
    let err = save_canvas(State(state), Path(Uuid::new_v4()), Json(json!({"a": {"b": 1}})))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err.code, "E_SANITIZE");
}
