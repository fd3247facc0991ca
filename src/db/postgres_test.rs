#[cfg(feature = "live-db-tests")]
use super::*;
#[cfg(feature = "live-db-tests")]
use serde_json::json;

#[cfg(feature = "live-db-tests")]
async fn live_store() -> PgStore {
    let url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("TEST_DATABASE_URL or DATABASE_URL required for live-db-tests");
    let pool = init_pool(&url, 2).await.expect("database init failed");
    PgStore::new(pool)
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
async fn live_create_update_get() {
    let store = live_store().await;
    let id = store.create(CanvasDocument::empty(1)).await.unwrap();
    assert_eq!(store.get(id).await.unwrap().unwrap().data, serde_json::Value::Null);

    store.update(id, json!({"path": {"item_0": [0, 0]}}), 2).await.unwrap();
    let doc = store.get(id).await.unwrap().unwrap();
    assert_eq!(doc.data, json!({"path": {"item_0": [0, 0]}}));
    assert_eq!(doc.created_at, 1);
    assert_eq!(doc.updated_at, 2);
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
async fn live_update_missing_is_not_found() {
    let store = live_store().await;
    let err = store.update(Uuid::new_v4(), json!({}), 1).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
async fn live_set_upserts() {
    let store = live_store().await;
    let id = Uuid::new_v4();
    store.set(id, CanvasDocument { data: json!([1]), created_at: 5, updated_at: 5 }).await.unwrap();
    store.set(id, CanvasDocument { data: json!([2]), created_at: 5, updated_at: 6 }).await.unwrap();
    let doc = store.get(id).await.unwrap().unwrap();
    assert_eq!(doc.data, json!([2]));
    assert_eq!(doc.updated_at, 6);
}

#[test]
fn pg_store_is_a_document_store() {
    fn assert_store<T: super::DocumentStore>() {}
    assert_store::<super::PgStore>();
}
