//! Core type definitions shared across the workspace.

pub mod id;
pub mod response;

pub use id::NodeId;
pub use response::ApiEnvelope;
