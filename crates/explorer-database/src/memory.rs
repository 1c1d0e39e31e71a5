//! Process-local node store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use explorer_core::error::AppError;
use explorer_core::result::AppResult;
use explorer_core::types::NodeId;
use explorer_entity::node::{NewNode, Node};

use crate::store::NodeStore;

#[derive(Debug, Default)]
struct State {
    nodes: HashMap<NodeId, Node>,
    /// Insertion order, which is also creation order.
    order: Vec<NodeId>,
    /// Direct children keyed by parent (`None` for the root level).
    children: HashMap<Option<NodeId>, Vec<NodeId>>,
}

impl State {
    fn sibling(&self, parent_id: Option<NodeId>, name: &str, exclude: Option<NodeId>) -> Option<&Node> {
        self.children
            .get(&parent_id)?
            .iter()
            .filter(|id| Some(**id) != exclude)
            .filter_map(|id| self.nodes.get(id))
            .find(|n| n.name == name)
    }
}

/// Node store kept entirely in memory.
///
/// Sibling-name checks and writes happen under a single write lock, so a
/// duplicate insert or rename is rejected as a conflict even when two
/// requests race.
#[derive(Debug, Default)]
pub struct MemoryNodeStore {
    state: RwLock<State>,
}

impl MemoryNodeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored nodes.
    pub async fn len(&self) -> usize {
        self.state.read().await.nodes.len()
    }

    /// Whether the store holds no nodes.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl NodeStore for MemoryNodeStore {
    async fn list_all(&self) -> AppResult<Vec<Node>> {
        let state = self.state.read().await;
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.nodes.get(id).cloned())
            .collect())
    }

    async fn find_by_id(&self, id: NodeId) -> AppResult<Option<Node>> {
        Ok(self.state.read().await.nodes.get(&id).cloned())
    }

    async fn find_sibling(
        &self,
        parent_id: Option<NodeId>,
        name: &str,
        exclude: Option<NodeId>,
    ) -> AppResult<Option<Node>> {
        Ok(self
            .state
            .read()
            .await
            .sibling(parent_id, name, exclude)
            .cloned())
    }

    async fn find_children(&self, parent_id: NodeId) -> AppResult<Vec<Node>> {
        let state = self.state.read().await;
        Ok(state
            .children
            .get(&Some(parent_id))
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.nodes.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, node: NewNode) -> AppResult<Node> {
        let mut state = self.state.write().await;

        if state
            .sibling(node.parent_id, node.name.as_str(), None)
            .is_some()
        {
            return Err(AppError::conflict("A node with this name already exists here"));
        }
        if let Some(parent_id) = node.parent_id {
            if !state.nodes.contains_key(&parent_id) {
                return Err(AppError::not_found("Parent folder not found"));
            }
        }

        let now = Utc::now();
        let created = Node {
            id: NodeId::new(),
            name: node.name.into_inner(),
            node_type: node.node_type,
            parent_id: node.parent_id,
            created_at: now,
            updated_at: now,
        };

        state.order.push(created.id);
        state
            .children
            .entry(created.parent_id)
            .or_default()
            .push(created.id);
        state.nodes.insert(created.id, created.clone());

        debug!(node_id = %created.id, "Stored node in memory");
        Ok(created)
    }

    async fn rename(&self, id: NodeId, name: &str) -> AppResult<Option<Node>> {
        let mut state = self.state.write().await;

        let Some(parent_id) = state.nodes.get(&id).map(|n| n.parent_id) else {
            return Ok(None);
        };
        if state.sibling(parent_id, name, Some(id)).is_some() {
            return Err(AppError::conflict("A node with this name already exists here"));
        }

        let Some(node) = state.nodes.get_mut(&id) else {
            return Ok(None);
        };
        node.name = name.to_string();
        node.updated_at = Utc::now();
        Ok(Some(node.clone()))
    }

    async fn delete(&self, id: NodeId) -> AppResult<bool> {
        let mut state = self.state.write().await;

        // Same outcome as the parent foreign key on Postgres.
        if state.children.get(&Some(id)).is_some_and(|kids| !kids.is_empty()) {
            return Err(AppError::storage("Failed to delete node: it still has children"));
        }

        let Some(removed) = state.nodes.remove(&id) else {
            return Ok(false);
        };
        state.order.retain(|other| *other != id);
        if let Some(siblings) = state.children.get_mut(&removed.parent_id) {
            siblings.retain(|other| *other != id);
        }
        state.children.remove(&Some(id));

        debug!(node_id = %id, "Removed node from memory");
        Ok(true)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }
}
