//! # explorer-client
//!
//! Client side of the file explorer.
//!
//! - [`tree`] rebuilds the ordered forest from the flat node list.
//! - [`optimistic`] applies mutations locally before the server answers
//!   and rolls them back when it refuses.
//! - [`api`] talks to the HTTP API through the [`TreeApi`] seam.

pub mod api;
pub mod error;
pub mod model;
pub mod notify;
pub mod optimistic;
pub mod tree;

pub use api::{HttpTreeApi, TreeApi};
pub use error::ClientError;
pub use model::{ClientNode, LocalId, TempId};
pub use notify::Notifier;
pub use optimistic::TreeController;
pub use tree::{TreeNode, build_tree};
