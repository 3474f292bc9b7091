//! # Text Analyzer
//!
//! An HTTP service that computes descriptive statistics over submitted text,
//! persists each result to a document store, and serves back recent results.
//!
//! ## Endpoints
//!
//! - **`GET|POST /TextAnalyzer`**: analyze `?text=` or a `{"text": ...}` body
//! - **`GET /GetAnalysisHistory`**: the `?limit=` (default 10) most recent analyses
//! - **`GET /health`**: liveness probe
//!
//! ## Architecture
//!
//! ```text
//! HTTP Client → axum Router → TextMetrics
//!                    ↓
//!              RecordStore (SQLite documents | in-memory)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use text_analyzer::{server, storage, AppState, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let store = storage::connect(&config.store).await?;
//!     let app = server::router(Arc::new(AppState::new(config, store)));
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:7071").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

/// Configuration management loaded from the environment.
pub mod config;
/// Error types and result aliases for the application.
pub mod error;
/// Text statistics computation.
pub mod metrics;
/// HTTP routing, handlers and shared state.
pub mod server;
/// Document store persistence for analysis records.
pub mod storage;

pub use config::Config;
pub use error::{ApiError, AppError, AppResult};
pub use metrics::TextMetrics;
pub use server::{AppState, SharedState};
pub use storage::{AnalysisRecord, RecordMetadata, RecordStore, RecordView};
