//! # explorer-database
//!
//! Persistence for nodes. [`store::NodeStore`] is the seam the tree
//! service depends on; [`repositories::NodeRepository`] implements it on
//! PostgreSQL and [`memory::MemoryNodeStore`] keeps everything in process.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryNodeStore;
pub use provider::build_store;
pub use repositories::NodeRepository;
pub use store::NodeStore;
