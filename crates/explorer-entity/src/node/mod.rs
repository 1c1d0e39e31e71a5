//! Node domain entities.

pub mod kind;
pub mod model;
pub mod name;

pub use kind::NodeType;
pub use model::{NewNode, Node};
pub use name::{MAX_NAME_LEN, NodeName};
