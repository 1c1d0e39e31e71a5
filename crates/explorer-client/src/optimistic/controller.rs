//! Owns the local node list and runs every mutation optimistically.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use explorer_core::config::ClientConfig;
use explorer_core::types::NodeId;
use explorer_entity::node::NodeType;

use super::transition;
use crate::api::TreeApi;
use crate::error::ClientError;
use crate::model::{ClientNode, LocalId, TempId};
use crate::notify::Notifier;
use crate::tree::{TreeNode, build_tree};

/// Message shown when the initial fetch fails.
pub const LOAD_FAILED: &str = "Failed to load file tree";

/// Local tree state with optimistic create, rename and delete.
///
/// Each mutation snapshots the list, applies the change locally, sends the
/// request, and then either reconciles with the server's answer or puts
/// the snapshot back and raises a notice. Subscribers receive every
/// published list through a `watch` channel.
pub struct TreeController {
    api: Arc<dyn TreeApi>,
    nodes: watch::Sender<Arc<Vec<ClientNode>>>,
    loading: watch::Sender<bool>,
    notices: watch::Sender<Notifier>,
}

impl fmt::Debug for TreeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeController")
            .field("nodes", &self.nodes.borrow().len())
            .field("loading", &*self.loading.borrow())
            .finish()
    }
}

impl TreeController {
    /// An empty controller; call [`TreeController::load`] to fetch the tree.
    pub fn new(api: Arc<dyn TreeApi>, notice_ttl: Duration) -> Self {
        Self {
            api,
            nodes: watch::Sender::new(Arc::new(Vec::new())),
            loading: watch::Sender::new(false),
            notices: watch::Sender::new(Notifier::new(notice_ttl)),
        }
    }

    /// Build from client configuration.
    pub fn from_config(api: Arc<dyn TreeApi>, config: &ClientConfig) -> Self {
        Self::new(api, config.notice_ttl())
    }

    /// Receive every list the controller publishes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<ClientNode>>> {
        self.nodes.subscribe()
    }

    /// The current flat list.
    pub fn nodes(&self) -> Arc<Vec<ClientNode>> {
        self.nodes.borrow().clone()
    }

    /// The current list as an ordered forest.
    pub fn tree(&self) -> Vec<TreeNode> {
        build_tree(&self.nodes())
    }

    /// Whether a full fetch is in progress.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// The visible error notice, if any.
    pub fn notice(&self) -> Option<String> {
        self.notices.borrow().current().map(str::to_string)
    }

    /// Hide the current notice.
    pub fn clear_notice(&self) {
        self.notices.send_modify(Notifier::dismiss);
    }

    /// Replace the local list with the server's.
    pub async fn load(&self) -> Result<(), ClientError> {
        self.loading.send_replace(true);
        let result = self.api.list_tree().await;
        self.loading.send_replace(false);

        match result {
            Ok(nodes) => {
                info!(count = nodes.len(), "Tree loaded");
                let nodes: Vec<ClientNode> = nodes.into_iter().map(ClientNode::from).collect();
                self.nodes.send_replace(Arc::new(nodes));
                self.clear_notice();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load tree");
                self.notices.send_modify(|n| n.raise(LOAD_FAILED));
                Err(e)
            }
        }
    }

    /// Create a folder; the placeholder is visible until the server answers.
    pub async fn create_folder(
        &self,
        name: &str,
        parent_id: Option<NodeId>,
    ) -> Result<ClientNode, ClientError> {
        self.create(NodeType::Folder, name, parent_id).await
    }

    /// Create a file; the placeholder is visible until the server answers.
    pub async fn create_file(
        &self,
        name: &str,
        parent_id: Option<NodeId>,
    ) -> Result<ClientNode, ClientError> {
        self.create(NodeType::File, name, parent_id).await
    }

    /// Rename a node, showing the new name immediately.
    pub async fn rename(&self, id: NodeId, name: &str) -> Result<(), ClientError> {
        let local = LocalId::Persisted(id);
        let snapshot = self.nodes();
        self.apply(|nodes| transition::apply_rename(nodes, &local, name));

        match self.api.rename_node(id, name).await {
            Ok(node) => {
                debug!(node_id = %node.id, name = %node.name, "Rename confirmed");
                Ok(())
            }
            Err(e) => {
                self.rollback(snapshot, &e);
                Err(e)
            }
        }
    }

    /// Delete a node and everything below it, hiding them immediately.
    pub async fn delete(&self, id: NodeId) -> Result<(), ClientError> {
        let local = LocalId::Persisted(id);
        let snapshot = self.nodes();
        self.apply(|nodes| transition::apply_delete(nodes, &local));

        match self.api.delete_node(id).await {
            Ok(()) => {
                debug!(node_id = %id, "Delete confirmed");
                Ok(())
            }
            Err(e) => {
                self.rollback(snapshot, &e);
                Err(e)
            }
        }
    }

    async fn create(
        &self,
        node_type: NodeType,
        name: &str,
        parent_id: Option<NodeId>,
    ) -> Result<ClientNode, ClientError> {
        let temp_id = TempId::generate();
        let snapshot = self.nodes();
        let placeholder = ClientNode::placeholder(temp_id.clone(), name, node_type, parent_id);
        self.apply(|nodes| transition::insert_placeholder(nodes, placeholder));
        debug!(temp_id = %temp_id, %node_type, "Placeholder inserted");

        let result = match node_type {
            NodeType::Folder => self.api.create_folder(name, parent_id).await,
            NodeType::File => self.api.create_file(name, parent_id).await,
        };

        match result {
            Ok(node) => {
                let confirmed = ClientNode::from(node);
                self.apply(|nodes| {
                    transition::reconcile_created(nodes, &temp_id, confirmed.clone())
                });
                debug!(temp_id = %temp_id, node_id = %confirmed.id, "Create confirmed");
                Ok(confirmed)
            }
            Err(e) => {
                self.rollback(snapshot, &e);
                Err(e)
            }
        }
    }

    fn apply(&self, step: impl FnOnce(&[ClientNode]) -> Vec<ClientNode>) {
        self.nodes.send_modify(|current| {
            let next = step(current.as_slice());
            *current = Arc::new(next);
        });
    }

    fn rollback(&self, snapshot: Arc<Vec<ClientNode>>, error: &ClientError) {
        warn!(error = %error, "Mutation failed, restoring previous tree");
        self.nodes.send_replace(snapshot);
        let message = error.user_message();
        self.notices.send_modify(|n| n.raise(message));
    }
}
