//! Builds the node store selected in configuration.

use std::sync::Arc;

use tracing::info;

use explorer_core::config::AppConfig;
use explorer_core::error::AppError;
use explorer_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryNodeStore;
use crate::repositories::NodeRepository;
use crate::store::NodeStore;

/// Create the store named by `store.provider`.
pub async fn build_store(config: &AppConfig) -> AppResult<Arc<dyn NodeStore>> {
    let store: Arc<dyn NodeStore> = match config.store.provider.as_str() {
        "postgres" => {
            info!("Initializing PostgreSQL node store");
            let pool = DatabasePool::connect(&config.database).await?;
            Arc::new(NodeRepository::new(pool.into_pool()))
        }
        "memory" => {
            info!("Initializing in-memory node store");
            Arc::new(MemoryNodeStore::new())
        }
        other => {
            return Err(AppError::configuration(format!(
                "Unknown store provider: '{other}'. Supported: memory, postgres"
            )));
        }
    };

    Ok(store)
}
