//! Rebuilds the nested tree from the flat parent-pointer list.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::model::{ClientNode, LocalId};

/// A node together with its sorted children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// The node itself.
    #[serde(flatten)]
    pub node: ClientNode,
    /// Direct children, folders first.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Number of nodes in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }

    /// Depth of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TreeNode::depth).max().unwrap_or(0)
    }
}

/// Summary figures for a built forest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ForestStats {
    /// Nodes reachable from the roots.
    pub count: usize,
    /// Folders among them.
    pub folders: usize,
    /// Longest root-to-leaf path, in nodes.
    pub depth: usize,
}

/// Sibling order: folders before files, then names compared
/// case-insensitively, lowercase first when they differ only in case, and
/// finally the id so the order is total.
pub fn compare_siblings(a: &ClientNode, b: &ClientNode) -> Ordering {
    a.node_type
        .cmp(&b.node_type)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| b.name.cmp(&a.name))
        .then_with(|| a.id.to_string().cmp(&b.id.to_string()))
}

/// Build the ordered forest from a flat list.
///
/// Nodes whose parent is missing from `nodes` are dropped along with their
/// subtree. A repeated id is kept once (first occurrence). Every level is
/// sorted with [`compare_siblings`]. The input is not modified.
pub fn build_tree(nodes: &[ClientNode]) -> Vec<TreeNode> {
    let mut by_id: HashMap<&LocalId, &ClientNode> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        by_id.entry(&node.id).or_insert(node);
    }

    let mut children: HashMap<&LocalId, Vec<&ClientNode>> = HashMap::new();
    let mut roots: Vec<&ClientNode> = Vec::new();
    let mut seen: HashSet<&LocalId> = HashSet::with_capacity(nodes.len());

    for node in nodes {
        if !seen.insert(&node.id) {
            continue;
        }
        match &node.parent_id {
            None => roots.push(node),
            Some(parent) if by_id.contains_key(parent) => {
                children.entry(parent).or_default().push(node);
            }
            Some(_) => {}
        }
    }

    assemble(roots, &mut children)
}

fn assemble<'a>(
    mut level: Vec<&'a ClientNode>,
    children: &mut HashMap<&'a LocalId, Vec<&'a ClientNode>>,
) -> Vec<TreeNode> {
    level.sort_by(|a, b| compare_siblings(a, b));
    level
        .into_iter()
        .map(|node| {
            // Taking the entry means each child list is consumed once.
            let kids = children.remove(&node.id).unwrap_or_default();
            TreeNode {
                node: node.clone(),
                children: assemble(kids, children),
            }
        })
        .collect()
}

/// Counts and depth of a forest.
pub fn forest_stats(forest: &[TreeNode]) -> ForestStats {
    fn walk(nodes: &[TreeNode], stats: &mut ForestStats) {
        for tree in nodes {
            stats.count += 1;
            if tree.node.is_folder() {
                stats.folders += 1;
            }
            walk(&tree.children, stats);
        }
    }

    let mut stats = ForestStats {
        depth: forest.iter().map(TreeNode::depth).max().unwrap_or(0),
        ..ForestStats::default()
    };
    walk(forest, &mut stats);
    stats
}

/// Find a node in the flat list.
pub fn find_node<'a>(nodes: &'a [ClientNode], id: &LocalId) -> Option<&'a ClientNode> {
    nodes.iter().find(|n| &n.id == id)
}

/// Every node below `id` in the flat list, at any depth.
pub fn collect_descendants<'a>(nodes: &'a [ClientNode], id: &LocalId) -> Vec<&'a ClientNode> {
    let mut out = Vec::new();
    let mut visited: HashSet<&LocalId> = HashSet::new();
    let mut pending = vec![id];

    while let Some(parent) = pending.pop() {
        if !visited.insert(parent) {
            continue;
        }
        for child in nodes.iter().filter(|n| n.parent_id.as_ref() == Some(parent)) {
            out.push(child);
            pending.push(&child.id);
        }
    }

    out
}
