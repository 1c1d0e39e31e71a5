//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use explorer_core::config::AppConfig;
use explorer_database::NodeStore;
use explorer_service::TreeService;

/// Shared application state, cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Tree operations.
    pub tree_service: Arc<TreeService>,
}

impl AppState {
    /// Wire the state around an already-built store.
    pub fn new(config: AppConfig, store: Arc<dyn NodeStore>) -> Self {
        Self {
            config: Arc::new(config),
            tree_service: Arc::new(TreeService::new(store)),
        }
    }
}
