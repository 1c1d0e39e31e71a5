//! Route definitions for the file explorer HTTP API.
//!
//! Tree routes are mounted under `/api`; the health probe sits at the root.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use explorer_core::types::ApiEnvelope;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", tree_routes())
        .merge(health_routes())
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Tree listing and node mutations.
fn tree_routes() -> Router<AppState> {
    Router::new()
        .route("/tree", get(handlers::tree::get_tree))
        .route("/folder", post(handlers::tree::create_folder))
        .route("/file", post(handlers::tree::create_file))
        .route("/rename", put(handlers::tree::rename_node))
        .route("/node/{id}", delete(handlers::tree::delete_node))
}

/// Liveness probe.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

async fn route_not_found() -> (StatusCode, Json<ApiEnvelope<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiEnvelope::error("Route not found")),
    )
}

async fn method_not_allowed() -> (StatusCode, Json<ApiEnvelope<()>>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiEnvelope::error("Method not allowed")),
    )
}
