//! # explorer-api
//!
//! HTTP API layer for the file explorer built on Axum.
//!
//! Provides the tree endpoints, middleware (CORS, request logging),
//! the validating JSON extractor, DTOs, and the mapping from
//! [`explorer_core::AppError`] to the `{success, message}` envelope.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;
