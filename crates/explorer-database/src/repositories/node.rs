//! Node repository implementation on PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;

use explorer_core::error::{AppError, ErrorKind};
use explorer_core::result::AppResult;
use explorer_core::types::NodeId;
use explorer_entity::node::{NewNode, Node};

use crate::store::NodeStore;

const COLUMNS: &str = "id, name, node_type, parent_id, created_at, updated_at";

/// Unique index guarding sibling names (see the `create_nodes` migration).
const SIBLING_NAME_KEY: &str = "nodes_sibling_name_key";

/// SQLSTATE for a foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Repository for node CRUD and child lookups.
#[derive(Debug, Clone)]
pub struct NodeRepository {
    pool: PgPool,
}

impl NodeRepository {
    /// Create a new node repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a write error, recognising the sibling-name index and a parent that
/// vanished between validation and insert.
fn map_write_error(e: sqlx::Error, action: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(SIBLING_NAME_KEY) => {
            AppError::conflict("A node with this name already exists here")
        }
        sqlx::Error::Database(ref db_err)
            if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) =>
        {
            AppError::not_found("Parent folder not found")
        }
        _ => AppError::with_source(ErrorKind::Storage, format!("Failed to {action}"), e),
    }
}

#[async_trait]
impl NodeStore for NodeRepository {
    async fn list_all(&self) -> AppResult<Vec<Node>> {
        sqlx::query_as::<_, Node>(&format!(
            "SELECT {COLUMNS} FROM nodes ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to list nodes", e))
    }

    async fn find_by_id(&self, id: NodeId) -> AppResult<Option<Node>> {
        sqlx::query_as::<_, Node>(&format!("SELECT {COLUMNS} FROM nodes WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to find node", e))
    }

    async fn find_sibling(
        &self,
        parent_id: Option<NodeId>,
        name: &str,
        exclude: Option<NodeId>,
    ) -> AppResult<Option<Node>> {
        sqlx::query_as::<_, Node>(&format!(
            "SELECT {COLUMNS} FROM nodes \
             WHERE parent_id IS NOT DISTINCT FROM $1 AND name = $2 \
             AND ($3::uuid IS NULL OR id <> $3) \
             LIMIT 1"
        ))
        .bind(parent_id)
        .bind(name)
        .bind(exclude)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to check sibling names", e))
    }

    async fn find_children(&self, parent_id: NodeId) -> AppResult<Vec<Node>> {
        sqlx::query_as::<_, Node>(&format!(
            "SELECT {COLUMNS} FROM nodes WHERE parent_id = $1 ORDER BY created_at ASC"
        ))
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to list children", e))
    }

    async fn insert(&self, node: NewNode) -> AppResult<Node> {
        sqlx::query_as::<_, Node>(&format!(
            "INSERT INTO nodes (name, node_type, parent_id) VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        ))
        .bind(node.name.as_str())
        .bind(node.node_type)
        .bind(node.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "create node"))
    }

    async fn rename(&self, id: NodeId, name: &str) -> AppResult<Option<Node>> {
        sqlx::query_as::<_, Node>(&format!(
            "UPDATE nodes SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "rename node"))
    }

    async fn delete(&self, id: NodeId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM nodes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to delete node", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Health check failed", e))
    }

    fn provider_name(&self) -> &'static str {
        "postgres"
    }
}
