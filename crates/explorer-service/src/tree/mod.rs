//! Node tree operations.

pub mod cascade;
pub mod service;

pub use service::{StoreStatus, TreeService};
