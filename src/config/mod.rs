use std::env;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub store: StoreConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Document store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Connection string; its scheme selects the backend (`sqlite:` or `memory:`).
    pub connection_string: String,
    pub database_name: String,
    pub container_name: String,
    pub max_connections: u32,
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    /// Base URL shown in the usage example returned when no text is supplied.
    pub public_base_url: String,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

pub const DEFAULT_CONNECTION_STRING: &str = "sqlite://./data/text-analyzer.db?mode=rwc";
pub const DEFAULT_DATABASE_NAME: &str = "TextAnalyzerDB";
pub const DEFAULT_CONTAINER_NAME: &str = "AnalysisHistory";
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:7071";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:7071";

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let store = StoreConfig {
            connection_string: env::var("STORE_CONNECTION_STRING")
                .unwrap_or_else(|_| DEFAULT_CONNECTION_STRING.to_string()),
            database_name: env::var("STORE_DATABASE_NAME")
                .unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string()),
            container_name: env::var("STORE_CONTAINER_NAME")
                .unwrap_or_else(|_| DEFAULT_CONTAINER_NAME.to_string()),
            max_connections: env::var("STORE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        };

        let server = ServerConfig {
            addr: env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let config = Config {
            store,
            server,
            logging,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the store cannot work with
    pub fn validate(&self) -> AppResult<()> {
        if self.store.connection_string.trim().is_empty() {
            return Err(AppError::Config {
                message: "STORE_CONNECTION_STRING must not be empty".to_string(),
            });
        }
        if self.store.database_name.trim().is_empty() {
            return Err(AppError::Config {
                message: "STORE_DATABASE_NAME must not be empty".to_string(),
            });
        }
        if self.store.container_name.trim().is_empty() {
            return Err(AppError::Config {
                message: "STORE_CONTAINER_NAME must not be empty".to_string(),
            });
        }
        if self.store.max_connections == 0 {
            return Err(AppError::Config {
                message: "STORE_MAX_CONNECTIONS must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// URL shown to clients as a worked example of the analyze endpoint
    pub fn usage_example(&self) -> String {
        format!(
            "{}/TextAnalyzer?text=Hello world",
            self.server.public_base_url.trim_end_matches('/')
        )
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            connection_string: DEFAULT_CONNECTION_STRING.to_string(),
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            container_name: DEFAULT_CONTAINER_NAME.to_string(),
            max_connections: 5,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_SERVER_ADDR.to_string(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
