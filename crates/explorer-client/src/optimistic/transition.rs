//! Pure state transitions applied by the controller.
//!
//! Each function takes the current list and returns the next one; the
//! input is never modified, so the caller's snapshot stays valid for
//! rollback.

use crate::model::{ClientNode, LocalId, TempId};
use crate::tree::collect_descendants;

/// Append a placeholder node.
pub fn insert_placeholder(nodes: &[ClientNode], placeholder: ClientNode) -> Vec<ClientNode> {
    let mut next = Vec::with_capacity(nodes.len() + 1);
    next.extend_from_slice(nodes);
    next.push(placeholder);
    next
}

/// Overwrite the name of `id` in place.
pub fn apply_rename(nodes: &[ClientNode], id: &LocalId, name: &str) -> Vec<ClientNode> {
    nodes
        .iter()
        .map(|n| {
            if &n.id == id {
                ClientNode {
                    name: name.trim().to_string(),
                    ..n.clone()
                }
            } else {
                n.clone()
            }
        })
        .collect()
}

/// Remove `id` and everything below it.
pub fn apply_delete(nodes: &[ClientNode], id: &LocalId) -> Vec<ClientNode> {
    let mut doomed: Vec<&LocalId> = collect_descendants(nodes, id)
        .into_iter()
        .map(|n| &n.id)
        .collect();
    doomed.push(id);

    nodes
        .iter()
        .filter(|n| !doomed.contains(&&n.id))
        .cloned()
        .collect()
}

/// Swap the placeholder carrying `temp_id` for the confirmed node.
///
/// A placeholder that is no longer present (for example, a reload
/// replaced the list meanwhile) leaves the list unchanged.
pub fn reconcile_created(
    nodes: &[ClientNode],
    temp_id: &TempId,
    confirmed: ClientNode,
) -> Vec<ClientNode> {
    nodes
        .iter()
        .map(|n| match &n.id {
            LocalId::Temporary(t) if t == temp_id => confirmed.clone(),
            _ => n.clone(),
        })
        .collect()
}
