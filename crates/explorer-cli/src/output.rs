//! Table, tree and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use explorer_client::TreeNode;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No nodes found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => print_json(items),
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    println!("{json}");
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<12} {}", format!("{key}:"), value);
}

/// Draw a forest with box-drawing connectors. Folders carry a trailing `/`.
pub fn render_tree(forest: &[TreeNode]) -> String {
    let mut out = String::new();
    for root in forest {
        out.push_str(&label(root));
        out.push('\n');
        render_children(&root.children, "", &mut out);
    }
    out
}

fn render_children(children: &[TreeNode], prefix: &str, out: &mut String) {
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(&label(child));
        out.push('\n');

        let nested = format!("{prefix}{}", if last { "    " } else { "│   " });
        render_children(&child.children, &nested, out);
    }
}

fn label(tree: &TreeNode) -> String {
    if tree.node.is_folder() {
        format!("{}/", tree.node.name)
    } else {
        tree.node.name.clone()
    }
}
