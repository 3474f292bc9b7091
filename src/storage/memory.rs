use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AnalysisRecord, RecordMetadata, RecordStore, RecordView};
use crate::error::StoreResult;
use crate::metrics::TextMetrics;

/// In-process record store for tests and local runs.
///
/// Ordering matches the SQLite store: newest `analyzed_at` first, equal
/// timestamps in reverse insertion order.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<AnalysisRecord>>,
}

impl MemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether nothing has been stored yet
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Full stored documents, original text included, in insertion order
    pub async fn documents(&self) -> Vec<AnalysisRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(
        &self,
        analysis: &TextMetrics,
        metadata: &RecordMetadata,
        original_text: &str,
    ) -> StoreResult<String> {
        let record = AnalysisRecord::new(analysis.clone(), metadata.clone(), original_text);
        let id = record.id.clone();
        self.records.write().await.push(record);
        Ok(id)
    }

    async fn list_recent(&self, limit: u32) -> StoreResult<Vec<RecordView>> {
        let records = self.records.read().await;

        let mut newest_first: Vec<&AnalysisRecord> = records.iter().rev().collect();
        // stable sort keeps reverse insertion order among equal timestamps
        newest_first.sort_by(|a, b| b.metadata.analyzed_at.cmp(&a.metadata.analyzed_at));

        Ok(newest_first
            .into_iter()
            .take(limit as usize)
            .map(AnalysisRecord::view)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_insert_keeps_original_text() {
        let store = MemoryRecordStore::new();
        let text = "kept in the document";
        let id = store
            .insert(&TextMetrics::compute(text), &RecordMetadata::now(text), text)
            .await
            .unwrap();

        let docs = store.documents().await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
        assert_eq!(docs[0].original_text, text);
    }

    #[tokio::test]
    async fn test_list_recent_orders_by_timestamp() {
        let store = MemoryRecordStore::new();
        let base = Utc::now();

        for (text, offset) in [("middle", 1), ("oldest", 0), ("newest", 2)] {
            let metadata = RecordMetadata::new(text, base + Duration::seconds(offset));
            store
                .insert(&TextMetrics::compute(text), &metadata, text)
                .await
                .unwrap();
        }

        let previews: Vec<String> = store
            .list_recent(10)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.metadata.text_preview)
            .collect();
        assert_eq!(previews, vec!["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_newest_insert_first() {
        let store = MemoryRecordStore::new();
        let at = Utc::now();

        for text in ["first", "second"] {
            store
                .insert(&TextMetrics::compute(text), &RecordMetadata::new(text, at), text)
                .await
                .unwrap();
        }

        let recent = store.list_recent(1).await.unwrap();
        assert_eq!(recent[0].metadata.text_preview, "second");
    }
}
