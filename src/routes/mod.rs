//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser editor talks to three canvas endpoints: create, load and save.
//! Scene rendering and input live entirely in the browser; the server only
//! sanitizes and persists what the editor exports.

pub mod canvases;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API router with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/canvases", post(canvases::create_canvas))
        .route("/api/canvases/{id}", get(canvases::get_canvas).put(canvases::save_canvas))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
