//! Client-side node representation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use explorer_core::types::NodeId;
use explorer_entity::node::{Node, NodeType};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Placeholder id for a node the server has not confirmed yet.
///
/// Format: `temp_<unix millis>_<session counter>_<random>`. The counter
/// keeps ids unique within a session even when the clock does not move.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TempId(String);

impl TempId {
    /// Prefix shared by every temporary id.
    pub const PREFIX: &'static str = "temp_";

    /// Generate a fresh temporary id.
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let random = Uuid::new_v4().simple().to_string();
        Self(format!("{}{millis}_{seq}_{}", Self::PREFIX, &random[..9]))
    }

    /// Borrow the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TempId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a node in the local list: confirmed by the server, or
/// still waiting for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalId {
    /// Server-assigned id.
    Persisted(NodeId),
    /// Placeholder id of an in-flight create.
    Temporary(TempId),
}

impl LocalId {
    /// Whether this node is still waiting for the server.
    pub fn is_temporary(&self) -> bool {
        matches!(self, Self::Temporary(_))
    }

    /// The server id, if confirmed.
    pub fn persisted(&self) -> Option<NodeId> {
        match self {
            Self::Persisted(id) => Some(*id),
            Self::Temporary(_) => None,
        }
    }
}

impl From<NodeId> for LocalId {
    fn from(id: NodeId) -> Self {
        Self::Persisted(id)
    }
}

impl From<TempId> for LocalId {
    fn from(id: TempId) -> Self {
        Self::Temporary(id)
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persisted(id) => write!(f, "{id}"),
            Self::Temporary(id) => write!(f, "{id}"),
        }
    }
}

/// A node as the client holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientNode {
    /// Local identity.
    pub id: LocalId,
    /// Display name.
    pub name: String,
    /// File or folder.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Parent folder (`None` at the root level).
    pub parent_id: Option<LocalId>,
    /// Creation time (local clock for placeholders).
    pub created_at: DateTime<Utc>,
}

impl ClientNode {
    /// Placeholder inserted before the server confirms a create.
    pub fn placeholder(
        temp_id: TempId,
        name: &str,
        node_type: NodeType,
        parent_id: Option<NodeId>,
    ) -> Self {
        Self {
            id: LocalId::Temporary(temp_id),
            name: name.trim().to_string(),
            node_type,
            parent_id: parent_id.map(LocalId::Persisted),
            created_at: Utc::now(),
        }
    }

    /// Whether this node can hold children.
    pub fn is_folder(&self) -> bool {
        self.node_type.is_folder()
    }
}

impl From<Node> for ClientNode {
    fn from(node: Node) -> Self {
        Self {
            id: LocalId::Persisted(node.id),
            name: node.name,
            node_type: node.node_type,
            parent_id: node.parent_id.map(LocalId::Persisted),
            created_at: node.created_at,
        }
    }
}
