use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Document store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store connection failed: {message}")]
    Connection { message: String },

    #[error("Migration failed: {message}")]
    Migration { message: String },

    #[error("Write failed: {message}")]
    Write { message: String },

    #[error("Read failed: {message}")]
    Read { message: String },

    #[error("Unsupported store backend: {scheme}")]
    UnsupportedBackend { scheme: String },
}

/// Errors surfaced at the HTTP handler boundary.
///
/// Every variant renders as a structured JSON body; nothing escapes as a bare
/// failure. A request body that cannot be parsed is not an error here, it
/// resolves to missing text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No text provided")]
    MissingInput { example: String },

    #[error("Failed to save to database")]
    StoreWrite { details: String },

    #[error("Failed to retrieve history")]
    StoreRead { details: String },
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
