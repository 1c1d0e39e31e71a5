//! Node CRUD with sibling-name and parent rules.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use explorer_core::error::AppError;
use explorer_core::types::NodeId;
use explorer_database::NodeStore;
use explorer_entity::node::{NewNode, Node, NodeName, NodeType};

use super::cascade;

/// Reachability of the backing store, reported by the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    /// Provider name (`memory`, `postgres`).
    pub provider: &'static str,
    /// Whether the last health check succeeded.
    pub healthy: bool,
}

/// Validates and applies tree mutations.
#[derive(Clone)]
pub struct TreeService {
    /// Node persistence.
    store: Arc<dyn NodeStore>,
}

impl std::fmt::Debug for TreeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeService")
            .field("store", &self.store.provider_name())
            .finish()
    }
}

/// Parse a client-supplied id, mapping a malformed value to `message`.
fn parse_id(raw: &str, message: &str) -> Result<NodeId, AppError> {
    raw.trim()
        .parse::<NodeId>()
        .map_err(|_| AppError::validation(message))
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self { store }
    }

    /// Every node, oldest first.
    pub async fn list_all(&self) -> Result<Vec<Node>, AppError> {
        self.store.list_all().await.map_err(|e| {
            warn!(error = %e, "Failed to fetch tree");
            AppError::storage("Failed to fetch tree")
        })
    }

    /// Creates a file or folder.
    ///
    /// `parent_id` is the raw id sent by the client; `None` or an empty
    /// string places the node at the root level.
    pub async fn create_node(
        &self,
        name: &str,
        node_type: NodeType,
        parent_id: Option<&str>,
    ) -> Result<Node, AppError> {
        let name = NodeName::parse(name, node_type.label())?;

        let parent_id = match parent_id.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => {
                let id = parse_id(raw, "Invalid parent ID")?;
                let parent = self
                    .store
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
                if !parent.is_folder() {
                    return Err(AppError::invalid_parent("Parent must be a folder"));
                }
                Some(id)
            }
            None => None,
        };

        if self
            .store
            .find_sibling(parent_id, name.as_str(), None)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "A {} with this name already exists here",
                node_type.as_str()
            )));
        }

        let node = self
            .store
            .insert(NewNode {
                name,
                node_type,
                parent_id,
            })
            .await?;

        info!(
            node_id = %node.id,
            node_type = %node.node_type,
            name = %node.name,
            parent_id = ?node.parent_id,
            "Node created"
        );

        Ok(node)
    }

    /// Renames a node. Renaming to the current name returns the node
    /// untouched.
    pub async fn rename_node(&self, id: &str, new_name: &str) -> Result<Node, AppError> {
        let id = parse_id(id, "Valid node ID is required")?;
        let name = NodeName::parse(new_name, "New")?;

        let node = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Node not found"))?;

        if node.name == name.as_str() {
            return Ok(node);
        }

        if self
            .store
            .find_sibling(node.parent_id, name.as_str(), Some(id))
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "A node with this name already exists here",
            ));
        }

        let renamed = self
            .store
            .rename(id, name.as_str())
            .await?
            .ok_or_else(|| AppError::not_found("Node not found"))?;

        info!(
            node_id = %renamed.id,
            old_name = %node.name,
            new_name = %renamed.name,
            "Node renamed"
        );

        Ok(renamed)
    }

    /// Deletes a node; a folder takes its whole subtree with it.
    ///
    /// Returns the number of records removed.
    pub async fn delete_node(&self, id: &str) -> Result<u64, AppError> {
        let id = parse_id(id, "Invalid node ID")?;

        let node = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Node not found"))?;

        let removed = if node.is_folder() {
            cascade::delete_subtree(self.store.as_ref(), id).await?
        } else {
            u64::from(self.store.delete(id).await?)
        };

        info!(
            node_id = %id,
            node_type = %node.node_type,
            removed,
            "Node deleted"
        );

        Ok(removed)
    }

    /// Probe the store.
    pub async fn store_status(&self) -> StoreStatus {
        let healthy = match self.store.health_check().await {
            Ok(ok) => ok,
            Err(e) => {
                warn!(error = %e, "Store health check failed");
                false
            }
        };
        StoreStatus {
            provider: self.store.provider_name(),
            healthy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use explorer_core::ErrorKind;
    use explorer_core::result::AppResult;
    use explorer_database::MemoryNodeStore;

    fn service() -> TreeService {
        TreeService::new(Arc::new(MemoryNodeStore::new()))
    }

    fn names(nodes: &[Node]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_create_trims_name_and_lists_in_creation_order() {
        let svc = service();
        svc.create_node("  docs  ", NodeType::Folder, None).await.unwrap();
        svc.create_node("a.txt", NodeType::File, Some("")).await.unwrap();

        let all = svc.list_all().await.unwrap();
        assert_eq!(names(&all), vec!["docs", "a.txt"]);
        assert!(all.iter().all(|n| n.parent_id.is_none()));
    }

    #[tokio::test]
    async fn test_create_validation_messages() {
        let svc = service();

        let err = svc.create_node("   ", NodeType::Folder, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Folder name is required");

        let err = svc.create_node("", NodeType::File, None).await.unwrap_err();
        assert_eq!(err.message, "File name is required");

        let long = "x".repeat(256);
        let err = svc.create_node(&long, NodeType::File, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = svc
            .create_node("a", NodeType::File, Some("not-an-id"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Invalid parent ID");
    }

    #[tokio::test]
    async fn test_create_parent_rules() {
        let svc = service();
        let file = svc.create_node("f", NodeType::File, None).await.unwrap();

        let missing = NodeId::new().to_string();
        let err = svc
            .create_node("x", NodeType::File, Some(&missing))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "Parent folder not found");

        let err = svc
            .create_node("x", NodeType::File, Some(&file.id.to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidParent);
        assert_eq!(err.message, "Parent must be a folder");
    }

    #[tokio::test]
    async fn test_duplicate_sibling_is_conflict() {
        let svc = service();
        let parent = svc.create_node("P", NodeType::Folder, None).await.unwrap();
        let pid = parent.id.to_string();

        svc.create_node("Notes", NodeType::Folder, Some(&pid)).await.unwrap();
        let err = svc
            .create_node("Notes", NodeType::Folder, Some(&pid))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "A folder with this name already exists here");

        // Trimmed names collide too.
        let err = svc
            .create_node(" Notes ", NodeType::File, Some(&pid))
            .await
            .unwrap_err();
        assert_eq!(err.message, "A file with this name already exists here");

        // Names are case-sensitive.
        svc.create_node("notes", NodeType::File, Some(&pid)).await.unwrap();
    }

    #[tokio::test]
    async fn test_rename_rules() {
        let svc = service();
        let a = svc.create_node("a", NodeType::File, None).await.unwrap();
        svc.create_node("b", NodeType::File, None).await.unwrap();
        let id = a.id.to_string();

        let same = svc.rename_node(&id, "  a ").await.unwrap();
        assert_eq!(same, a);

        let err = svc.rename_node(&id, "b").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "A node with this name already exists here");

        let err = svc.rename_node(&id, " ").await.unwrap_err();
        assert_eq!(err.message, "New name is required");

        let err = svc.rename_node("bogus", "c").await.unwrap_err();
        assert_eq!(err.message, "Valid node ID is required");

        let err = svc
            .rename_node(&NodeId::new().to_string(), "c")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let renamed = svc.rename_node(&id, "c").await.unwrap();
        assert_eq!(renamed.id, a.id);
        assert_eq!(renamed.name, "c");
        assert_eq!(renamed.node_type, a.node_type);
        assert_eq!(renamed.parent_id, a.parent_id);
        assert_eq!(renamed.created_at, a.created_at);
    }

    #[tokio::test]
    async fn test_delete_folder_cascades() {
        let svc = service();
        let a = svc.create_node("A", NodeType::Folder, None).await.unwrap();
        let aid = a.id.to_string();
        svc.create_node("b.txt", NodeType::File, Some(&aid)).await.unwrap();
        let sub = svc.create_node("sub", NodeType::Folder, Some(&aid)).await.unwrap();
        svc.create_node("deep.txt", NodeType::File, Some(&sub.id.to_string()))
            .await
            .unwrap();
        svc.create_node("keep", NodeType::File, None).await.unwrap();

        let removed = svc.delete_node(&aid).await.unwrap();
        assert_eq!(removed, 4);

        let all = svc.list_all().await.unwrap();
        assert_eq!(names(&all), vec!["keep"]);
    }

    #[tokio::test]
    async fn test_delete_errors() {
        let svc = service();
        let err = svc.delete_node("nope").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Invalid node ID");

        let err = svc.delete_node(&NodeId::new().to_string()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "Node not found");
    }

    /// Memory store that refuses to delete one particular record.
    struct FailingDelete {
        inner: MemoryNodeStore,
        poisoned: tokio::sync::Mutex<Option<NodeId>>,
    }

    #[async_trait]
    impl NodeStore for FailingDelete {
        async fn list_all(&self) -> AppResult<Vec<Node>> {
            self.inner.list_all().await
        }
        async fn find_by_id(&self, id: NodeId) -> AppResult<Option<Node>> {
            self.inner.find_by_id(id).await
        }
        async fn find_sibling(
            &self,
            parent_id: Option<NodeId>,
            name: &str,
            exclude: Option<NodeId>,
        ) -> AppResult<Option<Node>> {
            self.inner.find_sibling(parent_id, name, exclude).await
        }
        async fn find_children(&self, parent_id: NodeId) -> AppResult<Vec<Node>> {
            self.inner.find_children(parent_id).await
        }
        async fn insert(&self, node: NewNode) -> AppResult<Node> {
            self.inner.insert(node).await
        }
        async fn rename(&self, id: NodeId, name: &str) -> AppResult<Option<Node>> {
            self.inner.rename(id, name).await
        }
        async fn delete(&self, id: NodeId) -> AppResult<bool> {
            if *self.poisoned.lock().await == Some(id) {
                return Err(AppError::storage("disk unavailable"));
            }
            self.inner.delete(id).await
        }
        async fn health_check(&self) -> AppResult<bool> {
            Ok(false)
        }
        fn provider_name(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_cascade_is_not_transactional() {
        let store = Arc::new(FailingDelete {
            inner: MemoryNodeStore::new(),
            poisoned: tokio::sync::Mutex::new(None),
        });
        let svc = TreeService::new(store.clone());

        let root = svc.create_node("root", NodeType::Folder, None).await.unwrap();
        let rid = root.id.to_string();
        svc.create_node("first", NodeType::File, Some(&rid)).await.unwrap();
        let second = svc.create_node("second", NodeType::File, Some(&rid)).await.unwrap();
        *store.poisoned.lock().await = Some(second.id);

        let err = svc.delete_node(&rid).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);

        let left = svc.list_all().await.unwrap();
        assert_eq!(names(&left), vec!["root", "second"]);

        let status = svc.store_status().await;
        assert_eq!(status.provider, "failing");
        assert!(!status.healthy);
    }

    /// Memory store where a create lands under the folder being emptied
    /// right after its children were listed.
    struct LateChild {
        inner: MemoryNodeStore,
        armed: tokio::sync::Mutex<bool>,
    }

    #[async_trait]
    impl NodeStore for LateChild {
        async fn list_all(&self) -> AppResult<Vec<Node>> {
            self.inner.list_all().await
        }
        async fn find_by_id(&self, id: NodeId) -> AppResult<Option<Node>> {
            self.inner.find_by_id(id).await
        }
        async fn find_sibling(
            &self,
            parent_id: Option<NodeId>,
            name: &str,
            exclude: Option<NodeId>,
        ) -> AppResult<Option<Node>> {
            self.inner.find_sibling(parent_id, name, exclude).await
        }
        async fn find_children(&self, parent_id: NodeId) -> AppResult<Vec<Node>> {
            let children = self.inner.find_children(parent_id).await?;
            let mut armed = self.armed.lock().await;
            if *armed {
                *armed = false;
                self.inner
                    .insert(NewNode {
                        name: NodeName::parse("late.txt", "File")?,
                        node_type: NodeType::File,
                        parent_id: Some(parent_id),
                    })
                    .await?;
            }
            Ok(children)
        }
        async fn insert(&self, node: NewNode) -> AppResult<Node> {
            self.inner.insert(node).await
        }
        async fn rename(&self, id: NodeId, name: &str) -> AppResult<Option<Node>> {
            self.inner.rename(id, name).await
        }
        async fn delete(&self, id: NodeId) -> AppResult<bool> {
            self.inner.delete(id).await
        }
        async fn health_check(&self) -> AppResult<bool> {
            self.inner.health_check().await
        }
        fn provider_name(&self) -> &'static str {
            "late-child"
        }
    }

    #[tokio::test]
    async fn test_create_during_cascade_keeps_parent() {
        let store = Arc::new(LateChild {
            inner: MemoryNodeStore::new(),
            armed: tokio::sync::Mutex::new(false),
        });
        let svc = TreeService::new(store.clone());

        let dir = svc.create_node("dir", NodeType::Folder, None).await.unwrap();
        let did = dir.id.to_string();
        svc.create_node("early.txt", NodeType::File, Some(&did)).await.unwrap();
        *store.armed.lock().await = true;

        let err = svc.delete_node(&did).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);

        let left = svc.list_all().await.unwrap();
        assert_eq!(names(&left), vec!["dir", "late.txt"]);
        assert!(left.iter().all(|n| n.parent_id.is_none()
            || left.iter().any(|p| Some(p.id) == n.parent_id)));
    }
}
