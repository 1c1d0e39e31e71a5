//! Node type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a node is a file or a folder. Immutable after creation.
///
/// Ordered so that `Folder < File`, which is the display order used
/// when rendering a tree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "node_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A folder; may contain other nodes.
    Folder,
    /// A file; always a leaf.
    File,
}

impl NodeType {
    /// Whether nodes of this type may be used as a parent.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder)
    }

    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
        }
    }

    /// Capitalized label for user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Folder => "Folder",
            Self::File => "File",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = explorer_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "folder" => Ok(Self::Folder),
            "file" => Ok(Self::File),
            _ => Err(explorer_core::AppError::validation(format!(
                "Invalid node type: '{s}'. Expected one of: file, folder"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folders_order_before_files() {
        assert!(NodeType::Folder < NodeType::File);
    }

    #[test]
    fn test_wire_names_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&NodeType::Folder).expect("serialize"),
            "\"folder\""
        );
        let parsed: NodeType = serde_json::from_str("\"file\"").expect("deserialize");
        assert_eq!(parsed, NodeType::File);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert_eq!("Folder".parse::<NodeType>().ok(), Some(NodeType::Folder));
        assert!("symlink".parse::<NodeType>().is_err());
    }
}
