//! Application builder: wires state, router and middleware, and runs the
//! HTTP server until a shutdown signal arrives.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tracing::{info, warn};

use explorer_core::config::AppConfig;
use explorer_core::error::{AppError, ErrorKind};
use explorer_core::result::AppResult;
use explorer_database::NodeStore;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application around `store`.
pub fn build_app(config: AppConfig, store: Arc<dyn NodeStore>) -> Router {
    build_router(AppState::new(config, store))
}

/// Binds the configured address and serves until Ctrl+C or SIGTERM.
pub async fn serve(config: AppConfig, store: Arc<dyn NodeStore>) -> AppResult<()> {
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let app = build_app(config, store);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;

    info!(address = %addr, "File explorer server listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    // In-flight requests get `grace` to finish once the signal fires.
    let (result, timed_out) = tokio::select! {
        result = server.into_future() => (result, false),
        _ = async {
            let _ = shutdown_rx.wait_for(|stopping| *stopping).await;
            tokio::time::sleep(grace).await;
        } => (Ok(()), true),
    };

    if timed_out {
        warn!(grace_seconds = grace.as_secs(), "Graceful shutdown timed out");
    }

    result.map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;
    info!("File explorer server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
