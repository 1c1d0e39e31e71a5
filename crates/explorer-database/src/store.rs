//! The persistence seam used by the tree service.

use async_trait::async_trait;

use explorer_core::result::AppResult;
use explorer_core::types::NodeId;
use explorer_entity::node::{NewNode, Node};

/// Record-level access to persisted nodes.
///
/// Implementations enforce nothing beyond record integrity; sibling
/// uniqueness, parent validity and cascading are the service's job.
/// Stores that can detect a duplicate sibling atomically report it as
/// a conflict from [`NodeStore::insert`] and [`NodeStore::rename`].
#[async_trait]
pub trait NodeStore: Send + Sync + 'static {
    /// Every node, ordered by creation time ascending.
    async fn list_all(&self) -> AppResult<Vec<Node>>;

    /// Find a node by ID.
    async fn find_by_id(&self, id: NodeId) -> AppResult<Option<Node>>;

    /// Find the node named exactly `name` under `parent_id`, ignoring
    /// `exclude` when given.
    async fn find_sibling(
        &self,
        parent_id: Option<NodeId>,
        name: &str,
        exclude: Option<NodeId>,
    ) -> AppResult<Option<Node>>;

    /// Direct children of `parent_id`.
    async fn find_children(&self, parent_id: NodeId) -> AppResult<Vec<Node>>;

    /// Persist a new node, assigning its id and timestamps.
    async fn insert(&self, node: NewNode) -> AppResult<Node>;

    /// Change a node's name. Returns `None` when the node does not exist.
    async fn rename(&self, id: NodeId, name: &str) -> AppResult<Option<Node>>;

    /// Delete a single record. Returns `true` if a record was removed.
    ///
    /// A node that still has children is never removed; the call fails
    /// with a storage error and leaves the store unchanged.
    async fn delete(&self, id: NodeId) -> AppResult<bool>;

    /// Check that the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Short provider name for logs and health output.
    fn provider_name(&self) -> &'static str;
}
