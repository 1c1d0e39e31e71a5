//! Mutating commands: `mkdir`, `touch`, `rename` and `rm`.
//!
//! Each one goes through the optimistic controller, so a refusal from the
//! server is reported with the same notice a browser user would see.

use clap::Args;
use dialoguer::{Confirm, Input};

use explorer_client::tree::{collect_descendants, find_node};
use explorer_client::{ClientNode, LocalId, TreeController};
use explorer_core::error::AppError;
use explorer_core::types::NodeId;
use explorer_entity::node::NodeType;

use super::surfaced;
use crate::output::{self, OutputFormat};

/// Arguments for `mkdir` and `touch`
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Name of the new node; prompted for when omitted
    pub name: Option<String>,

    /// Folder to create it in; the root when omitted
    #[arg(short, long)]
    pub parent: Option<NodeId>,
}

/// Arguments for `rename`
#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Node to rename
    pub id: NodeId,
    /// New name
    pub name: String,
}

/// Arguments for `rm`
#[derive(Debug, Args)]
pub struct RmArgs {
    /// Node to delete
    pub id: NodeId,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Create a folder.
pub async fn mkdir(
    controller: &TreeController,
    args: &CreateArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    create(controller, NodeType::Folder, args, format).await
}

/// Create a file.
pub async fn touch(
    controller: &TreeController,
    args: &CreateArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    create(controller, NodeType::File, args, format).await
}

async fn create(
    controller: &TreeController,
    node_type: NodeType,
    args: &CreateArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None => {
            let entered: String = Input::new()
                .with_prompt(format!("Enter {} name", node_type.as_str()))
                .allow_empty(true)
                .interact_text()
                .map_err(|e| AppError::internal(format!("Input error: {e}")))?;
            if entered.trim().is_empty() {
                output::print_warning("No name given, nothing created.");
                return Ok(());
            }
            entered
        }
    };

    let result = match node_type {
        NodeType::Folder => controller.create_folder(&name, args.parent).await,
        NodeType::File => controller.create_file(&name, args.parent).await,
    };
    let created = result.map_err(|e| surfaced(controller, e))?;

    match format {
        OutputFormat::Json => output::print_json(&created),
        OutputFormat::Table => output::print_success(&format!(
            "{} '{}' created ({})",
            node_type.label(),
            created.name,
            created.id
        )),
    }
    Ok(())
}

/// Rename a node.
pub async fn rename(controller: &TreeController, args: &RenameArgs) -> Result<(), AppError> {
    controller
        .rename(args.id, &args.name)
        .await
        .map_err(|e| surfaced(controller, e))?;

    output::print_success(&format!("Renamed to '{}'", args.name.trim()));
    Ok(())
}

/// Delete a node after confirmation. Deleting a folder removes everything
/// below it.
pub async fn rm(controller: &TreeController, args: &RmArgs) -> Result<(), AppError> {
    let nodes = controller.nodes();
    let target = find_node(&nodes, &LocalId::Persisted(args.id));

    if !args.yes {
        if let Some(node) = target {
            let inside = collect_descendants(&nodes, &node.id).len();
            let confirmed = Confirm::new()
                .with_prompt(confirm_prompt(node, inside))
                .default(false)
                .interact()
                .map_err(|e| AppError::internal(format!("Input error: {e}")))?;
            if !confirmed {
                output::print_warning("Cancelled.");
                return Ok(());
            }
        }
    }

    controller
        .delete(args.id)
        .await
        .map_err(|e| surfaced(controller, e))?;

    output::print_success("Node deleted successfully");
    Ok(())
}

fn confirm_prompt(node: &ClientNode, inside: usize) -> String {
    match (node.node_type, inside) {
        (NodeType::File, _) => format!("Delete file \"{}\"?", node.name),
        (NodeType::Folder, 0) => format!("Delete folder \"{}\"?", node.name),
        (NodeType::Folder, n) => format!(
            "Delete folder \"{}\" and all its contents ({n} item{})?",
            node.name,
            if n == 1 { "" } else { "s" }
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn node(name: &str, node_type: NodeType) -> ClientNode {
        ClientNode {
            id: LocalId::Persisted(NodeId::new()),
            name: name.to_string(),
            node_type,
            parent_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_confirm_prompt_mentions_contents() {
        let folder = node("src", NodeType::Folder);
        assert_eq!(confirm_prompt(&folder, 0), "Delete folder \"src\"?");
        assert_eq!(
            confirm_prompt(&folder, 1),
            "Delete folder \"src\" and all its contents (1 item)?"
        );
        assert_eq!(
            confirm_prompt(&folder, 3),
            "Delete folder \"src\" and all its contents (3 items)?"
        );
        assert_eq!(
            confirm_prompt(&node("a.txt", NodeType::File), 0),
            "Delete file \"a.txt\"?"
        );
    }
}
