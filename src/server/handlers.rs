use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::SharedState;
use crate::error::ApiError;
use crate::metrics::TextMetrics;
use crate::storage::{RecordMetadata, RecordStore, RecordView};

/// History size used when `limit` is absent or not a positive integer.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Raw query pairs in request order.
///
/// Extracted as pairs rather than a typed struct so repeated or unexpected
/// keys never reject the request before the handler runs.
pub type QueryPairs = Vec<(String, String)>;

#[derive(Debug, Deserialize)]
struct AnalyzeBody {
    text: Option<String>,
}

/// Body of a successful history request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub count: usize,
    pub results: Vec<RecordView>,
}

/// Body returned when no text was supplied
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    pub error: String,
    pub how_to_use: HowToUse,
}

/// Ways to call the analyze endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HowToUse {
    pub option1: String,
    pub option2: String,
    pub example: String,
}

/// Body returned when the store fails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

/// Body of the liveness probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.to_string();
        match self {
            ApiError::MissingInput { example } => (
                StatusCode::BAD_REQUEST,
                Json(UsageResponse {
                    error,
                    how_to_use: HowToUse {
                        option1: "Add ?text=YourText to the URL".to_string(),
                        option2: "Send a POST request with JSON body: {\"text\": \"Your text here\"}"
                            .to_string(),
                        example,
                    },
                }),
            )
                .into_response(),
            ApiError::StoreWrite { details } | ApiError::StoreRead { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error, details }),
            )
                .into_response(),
        }
    }
}

/// First value of `key` in the query, if present
pub fn query_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Pick the text to analyze from the query string or a JSON body.
///
/// A non-empty `text` query parameter wins. Otherwise the body is read as
/// `{"text": "..."}`; a body that is not that shape counts as no text.
pub fn resolve_text(query_text: Option<String>, body: &[u8]) -> Option<String> {
    if let Some(text) = query_text.filter(|t| !t.is_empty()) {
        return Some(text);
    }

    if body.is_empty() {
        return None;
    }

    match serde_json::from_slice::<AnalyzeBody>(body) {
        Ok(parsed) => parsed.text.filter(|t| !t.is_empty()),
        Err(e) => {
            debug!(error = %e, "Ignoring request body that is not {{\"text\": string}}");
            None
        }
    }
}

/// Parse the history `limit`, defaulting to [`DEFAULT_HISTORY_LIMIT`] unless it
/// is a positive integer. Integers too large for `u32` saturate.
pub fn resolve_limit(raw: Option<&str>) -> u32 {
    let Some(digits) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return DEFAULT_HISTORY_LIMIT;
    };
    let digits = digits.strip_prefix('+').unwrap_or(digits);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return DEFAULT_HISTORY_LIMIT;
    }

    match digits.parse::<u32>() {
        Ok(0) => DEFAULT_HISTORY_LIMIT,
        Ok(limit) => limit,
        // All digits but out of range: larger than any history
        Err(_) if digits.bytes().any(|b| b != b'0') => u32::MAX,
        Err(_) => DEFAULT_HISTORY_LIMIT,
    }
}

/// Compute metrics for `text`, persist the record, and return its projection.
///
/// One write attempt is made; a store failure becomes [`ApiError::StoreWrite`].
pub async fn analyze(store: &dyn RecordStore, text: &str) -> Result<RecordView, ApiError> {
    let analysis = TextMetrics::compute(text);
    let metadata = RecordMetadata::now(text);

    let id = store
        .insert(&analysis, &metadata, text)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error");
            ApiError::StoreWrite {
                details: e.to_string(),
            }
        })?;

    info!(
        id = %id,
        word_count = analysis.word_count,
        "Analysis stored"
    );

    Ok(RecordView {
        id,
        analysis,
        metadata,
    })
}

/// Read back the `limit` most recent records.
pub async fn history(store: &dyn RecordStore, limit: u32) -> Result<HistoryResponse, ApiError> {
    let results = store.list_recent(limit).await.map_err(|e| {
        error!(error = %e, "History retrieval error");
        ApiError::StoreRead {
            details: e.to_string(),
        }
    })?;

    Ok(HistoryResponse {
        count: results.len(),
        results,
    })
}

/// `GET|POST /TextAnalyzer`
pub async fn analyze_text(
    State(state): State<SharedState>,
    Query(query): Query<QueryPairs>,
    body: Bytes,
) -> Result<Json<RecordView>, ApiError> {
    info!("Text Analyzer API was called");

    let query_text = query_param(&query, "text").map(str::to_string);
    let Some(text) = resolve_text(query_text, &body) else {
        return Err(ApiError::MissingInput {
            example: state.config.usage_example(),
        });
    };

    analyze(state.store.as_ref(), &text).await.map(Json)
}

/// `GET /GetAnalysisHistory`
pub async fn analysis_history(
    State(state): State<SharedState>,
    Query(query): Query<QueryPairs>,
) -> Result<Json<HistoryResponse>, ApiError> {
    info!("GetAnalysisHistory API was called");

    let limit = resolve_limit(query_param(&query, "limit"));
    history(state.store.as_ref(), limit).await.map(Json)
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
