mod config;
mod db;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use crate::db::DocumentStore;
use crate::db::memory::MemoryStore;
use crate::db::postgres::{PgStore, init_pool};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env().expect("invalid configuration");

    let store: Arc<dyn DocumentStore> = match config.database_url.as_deref() {
        Some(url) => {
            let pool = init_pool(url, config.database_max_connections)
                .await
                .expect("database init failed");
            tracing::info!(max_connections = config.database_max_connections, "postgres document store ready");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set: canvases are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    tracing::info!(
        sanitize_max_depth = config.sanitize_max_depth,
        restore_on_load = config.restore_on_load,
        "canvas persistence configured"
    );

    let state = state::AppState::new(store, &config);
    let app = routes::app(state);
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "canvas2d listening");
    axum::serve(listener, app).await.expect("server failed");
}
