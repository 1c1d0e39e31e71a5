//! Node entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use explorer_core::types::NodeId;

use super::kind::NodeType;
use super::name::NodeName;

/// A file or folder in the hierarchy. Nodes carry metadata only.
///
/// Serialized on the wire as
/// `{id, name, type, parentId, createdAt, updatedAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique node identifier, assigned by the store.
    pub id: NodeId,
    /// Node name, unique among its siblings.
    pub name: String,
    /// File or folder.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Parent folder ID (`null` for root-level nodes).
    pub parent_id: Option<NodeId>,
    /// When the node was created.
    pub created_at: DateTime<Utc>,
    /// When the node was last renamed (equal to `created_at` until then).
    pub updated_at: DateTime<Utc>,
}

impl Node {
    /// Check if this is a root-level node (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if this node can contain children.
    pub fn is_folder(&self) -> bool {
        self.node_type.is_folder()
    }
}

/// Data required to insert a new node. The store assigns the id and
/// timestamps.
#[derive(Debug, Clone)]
pub struct NewNode {
    /// Validated node name.
    pub name: NodeName,
    /// File or folder.
    pub node_type: NodeType,
    /// Parent folder (None for root).
    pub parent_id: Option<NodeId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_uses_camel_case_and_type_key() {
        let now = Utc::now();
        let node = Node {
            id: NodeId::new(),
            name: "b.txt".to_string(),
            node_type: NodeType::File,
            parent_id: None,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&node).expect("serialize");
        assert_eq!(json["type"], "file");
        assert_eq!(json["parentId"], serde_json::Value::Null);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("node_type").is_none());

        let back: Node = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, node);
        assert!(back.is_root());
        assert!(!back.is_folder());
    }
}
