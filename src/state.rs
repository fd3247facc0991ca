//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the document store behind a trait object plus the sanitizer limits
//! and load policy from [`Config`](crate::config::Config).

use std::sync::Arc;

use storable::Sanitizer;

use crate::config::Config;
use crate::db::DocumentStore;

/// Clone is required by Axum; the store is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub sanitizer: Sanitizer,
    pub restore_on_load: bool,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, config: &Config) -> Self {
        Self { store, sanitizer: Sanitizer::new(config.sanitize_max_depth), restore_on_load: config.restore_on_load }
    }
}
