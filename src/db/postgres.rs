//! Postgres-backed document store. One row per canvas, scene in a JSONB column.

use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::{CanvasDocument, CanvasId, DocumentStore, StoreError, check_storable};

/// Initialize the PostgreSQL connection pool and run migrations.
///
/// # Errors
///
/// Returns an error if the connection or migrations fail.
pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    Ok(pool)
}

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl DocumentStore for PgStore {
    async fn create(&self, doc: CanvasDocument) -> Result<CanvasId, StoreError> {
        check_storable(&doc.data)?;
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO canvases (id, data, created_at, updated_at) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(&doc.data)
            .bind(doc.created_at)
            .bind(doc.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn get(&self, id: CanvasId) -> Result<Option<CanvasDocument>, StoreError> {
        let row = sqlx::query_as::<_, (Value, i64, i64)>(
            "SELECT data, created_at, updated_at FROM canvases WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(data, created_at, updated_at)| CanvasDocument { data, created_at, updated_at }))
    }

    async fn set(&self, id: CanvasId, doc: CanvasDocument) -> Result<(), StoreError> {
        check_storable(&doc.data)?;
        sqlx::query(
            "INSERT INTO canvases (id, data, created_at, updated_at) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data, \
             created_at = EXCLUDED.created_at, updated_at = EXCLUDED.updated_at",
        )
        .bind(id)
        .bind(&doc.data)
        .bind(doc.created_at)
        .bind(doc.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, id: CanvasId, data: Value, updated_at: i64) -> Result<(), StoreError> {
        check_storable(&data)?;
        let result = sqlx::query("UPDATE canvases SET data = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(&data)
            .bind(updated_at)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "postgres_test.rs"]
mod tests;
