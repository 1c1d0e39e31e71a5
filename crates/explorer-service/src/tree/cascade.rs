//! Post-order removal of a folder's subtree.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use explorer_core::result::AppResult;
use explorer_core::types::NodeId;
use explorer_database::NodeStore;

type DeleteFuture<'a> = Pin<Box<dyn Future<Output = AppResult<u64>> + Send + 'a>>;

/// Delete every descendant of `folder_id`, then the folder itself.
///
/// Children are fetched through the parent index; each folder child is
/// emptied before it is removed. Records are removed one store call at a
/// time, so an error partway through leaves the already-deleted part of
/// the subtree gone. Returns the number of records removed.
pub fn delete_subtree(store: &dyn NodeStore, folder_id: NodeId) -> DeleteFuture<'_> {
    Box::pin(async move {
        let mut removed = 0u64;

        for child in store.find_children(folder_id).await? {
            if child.is_folder() {
                // The recursive call removes the child folder itself too.
                removed += delete_subtree(store, child.id).await?;
                continue;
            }
            if store.delete(child.id).await? {
                removed += 1;
            }
        }

        if store.delete(folder_id).await? {
            removed += 1;
        }

        debug!(folder_id = %folder_id, removed, "Subtree deleted");
        Ok(removed)
    })
}
