//! Response DTOs.

use serde::Serialize;

use explorer_service::StoreStatus;

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Fixed liveness text.
    pub status: &'static str,
    /// Store provider and reachability.
    pub store: StoreStatus,
    /// Server version.
    pub version: &'static str,
}
