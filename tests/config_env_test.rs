//! Config environment variable tests
//!
//! These tests verify that Config::from_env() reads environment variable
//! overrides and falls back to defaults. Note that Config::from_env() also
//! loads from .env file via dotenvy, so these tests only touch variables they
//! set themselves.
//!
//! Tests use #[serial] to prevent race conditions with shared env vars.

use serial_test::serial;
use std::env;

use text_analyzer::config::{
    Config, LogFormat, DEFAULT_CONNECTION_STRING, DEFAULT_CONTAINER_NAME, DEFAULT_DATABASE_NAME,
};
use text_analyzer::error::AppError;

const VARS: &[&str] = &[
    "STORE_CONNECTION_STRING",
    "STORE_DATABASE_NAME",
    "STORE_CONTAINER_NAME",
    "STORE_MAX_CONNECTIONS",
    "SERVER_ADDR",
    "PUBLIC_BASE_URL",
    "LOG_LEVEL",
    "LOG_FORMAT",
];

fn clear_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_config_defaults() {
    clear_vars();

    let config = Config::from_env().unwrap();

    assert_eq!(config.store.connection_string, DEFAULT_CONNECTION_STRING);
    assert_eq!(config.store.database_name, DEFAULT_DATABASE_NAME);
    assert_eq!(config.store.container_name, DEFAULT_CONTAINER_NAME);
    assert_eq!(config.store.max_connections, 5);
    assert_eq!(config.server.addr, "0.0.0.0:7071");
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
#[serial]
fn test_config_from_env_custom_store() {
    clear_vars();
    env::set_var("STORE_CONNECTION_STRING", "memory://");
    env::set_var("STORE_DATABASE_NAME", "OtherDB");
    env::set_var("STORE_CONTAINER_NAME", "Results");
    env::set_var("STORE_MAX_CONNECTIONS", "10");

    let config = Config::from_env().unwrap();
    assert_eq!(config.store.connection_string, "memory://");
    assert_eq!(config.store.database_name, "OtherDB");
    assert_eq!(config.store.container_name, "Results");
    assert_eq!(config.store.max_connections, 10);

    clear_vars();
}

#[test]
#[serial]
fn test_config_from_env_invalid_number_uses_default() {
    clear_vars();
    env::set_var("STORE_MAX_CONNECTIONS", "lots");

    let config = Config::from_env().unwrap();
    assert_eq!(config.store.max_connections, 5);

    clear_vars();
}

#[test]
#[serial]
fn test_config_from_env_zero_connections_rejected() {
    clear_vars();
    env::set_var("STORE_MAX_CONNECTIONS", "0");

    let result = Config::from_env();
    assert!(matches!(result, Err(AppError::Config { .. })));

    clear_vars();
}

#[test]
#[serial]
fn test_config_from_env_json_log_format() {
    clear_vars();
    env::set_var("LOG_FORMAT", "JSON");
    env::set_var("LOG_LEVEL", "debug");

    let config = Config::from_env().unwrap();
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.level, "debug");

    clear_vars();
}

#[test]
#[serial]
fn test_config_from_env_server() {
    clear_vars();
    env::set_var("SERVER_ADDR", "127.0.0.1:8080");
    env::set_var("PUBLIC_BASE_URL", "https://analyzer.example.com/api");

    let config = Config::from_env().unwrap();
    assert_eq!(config.server.addr, "127.0.0.1:8080");
    assert_eq!(
        config.usage_example(),
        "https://analyzer.example.com/api/TextAnalyzer?text=Hello world"
    );

    clear_vars();
}
