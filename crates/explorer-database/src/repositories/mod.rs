//! PostgreSQL repository implementations.

pub mod node;

pub use node::NodeRepository;
