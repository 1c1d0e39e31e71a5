//! Read-only commands: `tree` and `ls`.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use explorer_client::tree::forest_stats;
use explorer_client::{LocalId, TreeController, TreeNode};
use explorer_core::error::AppError;
use explorer_core::types::NodeId;

use crate::output::{self, OutputFormat};

/// Arguments for `ls`
#[derive(Debug, Args)]
pub struct LsArgs {
    /// Only list the direct children of this folder
    #[arg(short, long)]
    pub parent: Option<NodeId>,
}

/// One `ls` row; `path` is the chain of names from the root.
#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct NodeRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "type")]
    pub node_type: String,
    #[tabled(rename = "Path")]
    pub path: String,
    #[tabled(skip)]
    pub parent_id: Option<String>,
    #[tabled(rename = "Created")]
    pub created_at: String,
}

/// Print the tree with box-drawing connectors, or as nested JSON.
pub fn tree(controller: &TreeController, format: OutputFormat) -> Result<(), AppError> {
    let forest = controller.tree();

    match format {
        OutputFormat::Json => output::print_json(&forest),
        OutputFormat::Table => {
            if forest.is_empty() {
                output::print_warning("The tree is empty. Create a folder with `explorer mkdir <name>`.");
                return Ok(());
            }
            print!("{}", output::render_tree(&forest));

            let stats = forest_stats(&forest);
            println!();
            output::print_kv("Folders", &stats.folders.to_string());
            output::print_kv("Files", &(stats.count - stats.folders).to_string());
            output::print_kv("Depth", &stats.depth.to_string());
        }
    }

    Ok(())
}

/// List every node in tree order, optionally only one folder's children.
pub fn ls(controller: &TreeController, args: &LsArgs, format: OutputFormat) -> Result<(), AppError> {
    let mut rows = Vec::new();
    flatten(&controller.tree(), "", &mut rows);

    if let Some(parent) = args.parent {
        let nodes = controller.nodes();
        let parent_id = LocalId::Persisted(parent);
        if explorer_client::tree::find_node(&nodes, &parent_id).is_none() {
            return Err(AppError::not_found("Parent folder not found"));
        }
        let wanted = parent.to_string();
        rows.retain(|row| row.parent_id.as_deref() == Some(wanted.as_str()));
    }

    output::print_list(&rows, format);
    Ok(())
}

fn flatten(level: &[TreeNode], prefix: &str, rows: &mut Vec<NodeRow>) {
    for tree in level {
        let node = &tree.node;
        let path = if prefix.is_empty() {
            node.name.clone()
        } else {
            format!("{prefix}/{}", node.name)
        };

        rows.push(NodeRow {
            id: node.id.to_string(),
            node_type: node.node_type.as_str().to_string(),
            path: path.clone(),
            parent_id: node.parent_id.as_ref().map(ToString::to_string),
            created_at: node.created_at.format("%Y-%m-%d %H:%M").to_string(),
        });
        flatten(&tree.children, &path, rows);
    }
}
