//! HTTP surface for text analysis.
//!
//! This module provides:
//! - Shared application state with an injected record store
//! - The axum router exposing the analyze, history and health endpoints
//! - Transport-independent request flows (`analyze`, `history`)

mod handlers;

pub use handlers::*;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::storage::RecordStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Record store backend, shared by all requests without extra locking.
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config, store: Arc<dyn RecordStore>) -> Self {
        Self { config, store }
    }
}

/// Shared application state handle
pub type SharedState = Arc<AppState>;

/// Build the router with all routes and state applied.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/TextAnalyzer", get(analyze_text).post(analyze_text))
        .route("/GetAnalysisHistory", get(analysis_history))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryRecordStore;

    #[test]
    fn test_app_state_new() {
        let store = Arc::new(MemoryRecordStore::new());
        let state = AppState::new(Config::default(), store);
        assert_eq!(state.config.store.container_name, "AnalysisHistory");
    }

    #[test]
    fn test_app_state_clone_shares_store() {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::new());
        let state = AppState::new(Config::default(), store.clone());
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.store, &cloned.store));
    }
}
