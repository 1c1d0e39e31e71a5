//! HTTP access to the tree API.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use explorer_core::config::ClientConfig;
use explorer_core::types::{ApiEnvelope, NodeId};
use explorer_entity::node::Node;

use crate::error::ClientError;

/// Remote operations the controller depends on.
#[async_trait]
pub trait TreeApi: Send + Sync {
    /// Every node, oldest first.
    async fn list_tree(&self) -> Result<Vec<Node>, ClientError>;

    /// Create a folder under `parent_id` (root when `None`).
    async fn create_folder(
        &self,
        name: &str,
        parent_id: Option<NodeId>,
    ) -> Result<Node, ClientError>;

    /// Create a file under `parent_id` (root when `None`).
    async fn create_file(&self, name: &str, parent_id: Option<NodeId>) -> Result<Node, ClientError>;

    /// Rename a node.
    async fn rename_node(&self, id: NodeId, name: &str) -> Result<Node, ClientError>;

    /// Delete a node and, for folders, its subtree.
    async fn delete_node(&self, id: NodeId) -> Result<(), ClientError>;
}

/// [`TreeApi`] over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTreeApi {
    base_url: String,
    client: Client,
}

impl HttpTreeApi {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(&config.base_url, client))
    }

    /// Use an existing `reqwest` client.
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Base URL including the `/api` prefix.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn create(
        &self,
        path: &str,
        name: &str,
        parent_id: Option<NodeId>,
        fallback: &str,
    ) -> Result<Node, ClientError> {
        let response = self
            .client
            .post(self.url(path))
            .json(&json!({ "name": name, "parentId": parent_id }))
            .send()
            .await?;
        let envelope = decode::<Node>(response, fallback).await?;
        require_data(envelope)
    }
}

/// Read an envelope, turning a failed one into [`ClientError::Api`].
///
/// `fallback` is used when a failed response carries no message.
async fn decode<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> Result<ApiEnvelope<T>, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;
    debug!(status = status.as_u16(), bytes = body.len(), "Tree API response");

    match serde_json::from_slice::<ApiEnvelope<T>>(&body) {
        Ok(envelope) if status.is_success() && envelope.success => Ok(envelope),
        Ok(envelope) => Err(ClientError::Api {
            status: failure_status(status),
            message: envelope.message.unwrap_or_else(|| fallback.to_string()),
        }),
        Err(_) if !status.is_success() => Err(ClientError::Api {
            status,
            message: fallback.to_string(),
        }),
        Err(e) => Err(ClientError::Decode(e.to_string())),
    }
}

/// A `{success: false}` body with a 2xx status is still a failure.
fn failure_status(status: StatusCode) -> StatusCode {
    if status.is_success() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        status
    }
}

fn require_data<T>(envelope: ApiEnvelope<T>) -> Result<T, ClientError> {
    envelope
        .data
        .ok_or_else(|| ClientError::Decode("response has no data".to_string()))
}

#[async_trait]
impl TreeApi for HttpTreeApi {
    async fn list_tree(&self) -> Result<Vec<Node>, ClientError> {
        let response = self.client.get(self.url("/tree")).send().await?;
        require_data(decode(response, "Failed to fetch tree").await?)
    }

    async fn create_folder(
        &self,
        name: &str,
        parent_id: Option<NodeId>,
    ) -> Result<Node, ClientError> {
        self.create("/folder", name, parent_id, "Failed to create folder")
            .await
    }

    async fn create_file(&self, name: &str, parent_id: Option<NodeId>) -> Result<Node, ClientError> {
        self.create("/file", name, parent_id, "Failed to create file")
            .await
    }

    async fn rename_node(&self, id: NodeId, name: &str) -> Result<Node, ClientError> {
        let response = self
            .client
            .put(self.url("/rename"))
            .json(&json!({ "id": id, "name": name }))
            .send()
            .await?;
        require_data(decode(response, "Failed to rename node").await?)
    }

    async fn delete_node(&self, id: NodeId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/node/{id}")))
            .send()
            .await?;
        decode::<serde_json::Value>(response, "Failed to delete node").await?;
        Ok(())
    }
}
