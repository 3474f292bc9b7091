use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use text_analyzer::{
    config::{Config, LogFormat},
    server::{self, AppState},
    storage,
};

/// Text analysis HTTP service
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Address to bind, overriding SERVER_ADDR
    #[arg(long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(addr) = cli.addr {
        config.server.addr = addr;
    }

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Text Analyzer starting..."
    );

    // Initialize the document store
    let store = match storage::connect(&config.store).await {
        Ok(s) => {
            info!(
                database = %config.store.database_name,
                container = %config.store.container_name,
                "Document store initialized"
            );
            s
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize document store");
            return Err(e.into());
        }
    };

    let addr = config.server.addr.clone();
    let state = Arc::new(AppState::new(config, store));
    let app = server::router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(error = %e, addr = %addr, "Failed to bind server address");
            return Err(e.into());
        }
    };

    info!(addr = %addr, "Server ready, waiting for requests...");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
