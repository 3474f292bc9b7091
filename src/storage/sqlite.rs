use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use super::{AnalysisRecord, RecordMetadata, RecordStore, RecordView};
use crate::config::{StoreConfig, DEFAULT_CONTAINER_NAME, DEFAULT_DATABASE_NAME};
use crate::error::{StoreError, StoreResult};
use crate::metrics::TextMetrics;

/// Static migrator that embeds migrations at compile time
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// SQLite-backed document store.
///
/// Each record is one JSON document in the `documents` table, scoped to the
/// configured database and container names.
#[derive(Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
    database_name: String,
    container_name: String,
}

impl SqliteRecordStore {
    /// Connect using `config.connection_string` and run migrations
    pub async fn new(config: &StoreConfig) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.connection_string)
            .map_err(|e| StoreError::Connection {
                message: format!("Invalid connection string: {}", e),
            })?
            .create_if_missing(true);

        ensure_parent_dir(options.get_filename())?;

        let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
        if is_in_memory(&config.connection_string) {
            // The database lives only as long as one connection stays open
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection {
                message: format!("Failed to connect to document store: {}", e),
            })?;

        let store = Self {
            pool,
            database_name: config.database_name.clone(),
            container_name: config.container_name.clone(),
        };
        store.run_migrations().await?;

        Ok(store)
    }

    /// Private in-memory database, used by tests
    pub async fn new_in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
            StoreError::Connection {
                message: format!("Invalid connection string: {}", e),
            }
        })?;

        // A single connection that never expires, or the database vanishes
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection {
                message: format!("Failed to open in-memory database: {}", e),
            })?;

        let store = Self {
            pool,
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            container_name: DEFAULT_CONTAINER_NAME.to_string(),
        };
        store.run_migrations().await?;

        Ok(store)
    }

    /// Run database migrations using embedded sqlx migrations
    async fn run_migrations(&self) -> StoreResult<()> {
        info!("Running document store migrations...");

        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Migration {
                message: format!("Failed to run migrations: {}", e),
            })?;

        info!("Document store migrations completed successfully");
        Ok(())
    }

    /// Close the pool. Later calls fail as if the store were unreachable.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Get the underlying pool for advanced queries
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Whether a `sqlite:` connection string names an in-memory database
fn is_in_memory(connection_string: &str) -> bool {
    let lower = connection_string.to_lowercase();
    lower.contains(":memory:") || lower.contains("mode=memory")
}

fn ensure_parent_dir(path: &Path) -> StoreResult<()> {
    if path.as_os_str().is_empty() || path == Path::new(":memory:") {
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::Connection {
            message: format!("Failed to create database directory: {}", e),
        })?;
    }

    Ok(())
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn insert(
        &self,
        analysis: &TextMetrics,
        metadata: &RecordMetadata,
        original_text: &str,
    ) -> StoreResult<String> {
        let record = AnalysisRecord::new(analysis.clone(), metadata.clone(), original_text);
        let body = serde_json::to_string(&record).map_err(|e| StoreError::Write {
            message: format!("Failed to serialize record: {}", e),
        })?;

        let result = sqlx::query(
            r#"
            INSERT INTO documents (id, database_name, container_name, analyzed_at, body)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&self.database_name)
        .bind(&self.container_name)
        .bind(record.metadata.analyzed_at.timestamp_micros())
        .bind(&body)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Write {
            message: e.to_string(),
        })?;

        if result.rows_affected() != 1 {
            return Err(StoreError::Write {
                message: format!(
                    "Unexpected write acknowledgement: {} rows affected",
                    result.rows_affected()
                ),
            });
        }

        debug!(id = %record.id, container = %self.container_name, "Record created");
        Ok(record.id)
    }

    async fn list_recent(&self, limit: u32) -> StoreResult<Vec<RecordView>> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT json_remove(body, '$.originalText') AS body
            FROM documents
            WHERE database_name = ? AND container_name = ?
            ORDER BY analyzed_at DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(&self.database_name)
        .bind(&self.container_name)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Read {
            message: e.to_string(),
        })?;

        rows.into_iter().map(RecordView::try_from).collect()
    }
}

// Internal row type for SQLx mapping
#[derive(sqlx::FromRow)]
struct DocumentRow {
    body: String,
}

impl TryFrom<DocumentRow> for RecordView {
    type Error = StoreError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        serde_json::from_str(&row.body).map_err(|e| StoreError::Read {
            message: format!("Malformed stored document: {}", e),
        })
    }
}
