//! Document store persistence for analysis records.
//!
//! Records are written once and never updated or deleted. Reads only ever see
//! [`RecordView`] projections, which leave out the original text.

mod memory;
mod sqlite;

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;

pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::metrics::{text_preview, TextMetrics};

/// Descriptive fields stored alongside the metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    /// When the text was analyzed (UTC, ISO-8601 on the wire).
    pub analyzed_at: DateTime<Utc>,
    /// First 100 characters of the text, with `...` if truncated.
    pub text_preview: String,
}

impl RecordMetadata {
    /// Metadata for `text` analyzed at `analyzed_at`.
    pub fn new(text: &str, analyzed_at: DateTime<Utc>) -> Self {
        Self {
            analyzed_at,
            text_preview: text_preview(text),
        }
    }

    /// Metadata for `text` analyzed now.
    pub fn now(text: &str) -> Self {
        Self::new(text, Utc::now())
    }
}

/// The persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// Unique identifier assigned at creation.
    pub id: String,
    /// Metrics computed from the original text.
    pub analysis: TextMetrics,
    /// Timestamp and preview.
    pub metadata: RecordMetadata,
    /// Full input; written but never returned by reads.
    pub original_text: String,
}

impl AnalysisRecord {
    /// Build a record with a freshly generated v4 UUID.
    pub fn new(
        analysis: TextMetrics,
        metadata: RecordMetadata,
        original_text: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            analysis,
            metadata,
            original_text: original_text.into(),
        }
    }

    /// Project away the original text.
    pub fn view(&self) -> RecordView {
        RecordView {
            id: self.id.clone(),
            analysis: self.analysis.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

/// A record as returned to clients: everything except `originalText`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    pub id: String,
    pub analysis: TextMetrics,
    pub metadata: RecordMetadata,
}

impl From<AnalysisRecord> for RecordView {
    fn from(record: AnalysisRecord) -> Self {
        Self {
            id: record.id,
            analysis: record.analysis,
            metadata: record.metadata,
        }
    }
}

/// Persistence façade over the document store.
///
/// Implementations make exactly one attempt per call and report failure
/// immediately; retries are not this layer's concern.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create a record and return its generated id.
    ///
    /// Any failure to persist, including an unexpected acknowledgement, is
    /// [`StoreError::Write`].
    async fn insert(
        &self,
        analysis: &TextMetrics,
        metadata: &RecordMetadata,
        original_text: &str,
    ) -> StoreResult<String>;

    /// Up to `limit` records, newest `analyzed_at` first.
    ///
    /// Failures are [`StoreError::Read`].
    async fn list_recent(&self, limit: u32) -> StoreResult<Vec<RecordView>>;
}

/// Open the store named by `config.connection_string`.
///
/// `sqlite:` connection strings open a [`SqliteRecordStore`]; `memory:` gives a
/// fresh [`MemoryRecordStore`].
pub async fn connect(config: &StoreConfig) -> StoreResult<Arc<dyn RecordStore>> {
    let scheme = config
        .connection_string
        .split(':')
        .next()
        .unwrap_or_default()
        .to_lowercase();

    match scheme.as_str() {
        "sqlite" => Ok(Arc::new(SqliteRecordStore::new(config).await?)),
        "memory" => Ok(Arc::new(MemoryRecordStore::new())),
        _ => Err(StoreError::UnsupportedBackend { scheme }),
    }
}
