//! # explorer-service
//!
//! Business logic for the file explorer. [`TreeService`] validates every
//! mutation, enforces sibling-name uniqueness and parent rules, and runs
//! the cascading delete on top of any [`explorer_database::NodeStore`].
//!
//! Dependencies are provided at construction time via `Arc` references.

pub mod tree;

pub use tree::{StoreStatus, TreeService};
