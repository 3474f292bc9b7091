//! Unit tests for storage types and their JSON document shape.

use super::*;
use chrono::TimeZone;
use serde_json::json;

fn sample_record() -> AnalysisRecord {
    let text = "Hello world. This is great!";
    let analyzed_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
    AnalysisRecord::new(
        TextMetrics::compute(text),
        RecordMetadata::new(text, analyzed_at),
        text,
    )
}

// ============================================================================
// AnalysisRecord tests
// ============================================================================

#[test]
fn test_record_new_generates_uuid() {
    let record = sample_record();
    assert!(Uuid::parse_str(&record.id).is_ok());
    assert_eq!(record.original_text, "Hello world. This is great!");
}

#[test]
fn test_record_ids_are_unique() {
    assert_ne!(sample_record().id, sample_record().id);
}

#[test]
fn test_record_document_uses_camel_case() {
    let value = serde_json::to_value(sample_record()).unwrap();

    assert!(value.get("originalText").is_some());
    assert_eq!(value["metadata"]["analyzedAt"], json!("2024-03-01T12:30:00Z"));
    assert_eq!(value["metadata"]["textPreview"], json!("Hello world. This is great!"));
    assert_eq!(value["analysis"]["wordCount"], json!(5));
    assert_eq!(value["analysis"]["characterCountNoSpaces"], json!(23));
    assert_eq!(value["analysis"]["longestWord"], json!("Hello"));
}

// ============================================================================
// RecordView tests
// ============================================================================

#[test]
fn test_view_omits_original_text() {
    let record = sample_record();
    let view = record.view();

    assert_eq!(view.id, record.id);
    assert_eq!(view.analysis, record.analysis);
    assert_eq!(view.metadata, record.metadata);

    let value = serde_json::to_value(&view).unwrap();
    assert!(value.get("originalText").is_none());
}

#[test]
fn test_view_from_record_matches_view() {
    let record = sample_record();
    let by_ref = record.view();
    let by_value = RecordView::from(record);
    assert_eq!(by_ref, by_value);
}

#[test]
fn test_view_parses_full_document() {
    // Extra fields in a stored document are ignored
    let body = serde_json::to_string(&sample_record()).unwrap();
    let view: RecordView = serde_json::from_str(&body).unwrap();
    assert_eq!(view.analysis.sentence_count, 2);
}

// ============================================================================
// RecordMetadata tests
// ============================================================================

#[test]
fn test_metadata_preview_truncates() {
    let text = "a".repeat(150);
    let metadata = RecordMetadata::now(&text);
    assert_eq!(metadata.text_preview, format!("{}...", "a".repeat(100)));
}

#[tokio::test]
async fn test_connect_rejects_unknown_scheme() {
    let config = StoreConfig {
        connection_string: "mongodb://localhost:27017".to_string(),
        ..StoreConfig::default()
    };
    let err = connect(&config).await.err().unwrap();
    assert!(matches!(err, StoreError::UnsupportedBackend { ref scheme } if scheme == "mongodb"));
}

#[tokio::test]
async fn test_connect_memory_backend() {
    let config = StoreConfig {
        connection_string: "memory://".to_string(),
        ..StoreConfig::default()
    };
    let store = connect(&config).await.unwrap();
    assert!(store.list_recent(10).await.unwrap().is_empty());
}
