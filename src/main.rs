//! File Explorer server
//!
//! Main entry point: loads configuration, sets up logging, opens the node
//! store and serves the HTTP API until shutdown.

use tracing_subscriber::{EnvFilter, fmt};

use explorer_core::config::AppConfig;
use explorer_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `EXPLORER_CONFIG` when set, otherwise from
/// `config/default.toml` plus the `EXPLORER_ENV` overlay.
fn load_configuration() -> Result<AppConfig, AppError> {
    match std::env::var("EXPLORER_CONFIG") {
        Ok(path) => AppConfig::load_from(&path),
        Err(_) => {
            let env = std::env::var("EXPLORER_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        store = %config.store.provider,
        "Starting File Explorer"
    );

    let store = explorer_database::build_store(&config).await?;
    explorer_api::serve(config, store).await?;

    tracing::info!("File Explorer stopped");
    Ok(())
}
