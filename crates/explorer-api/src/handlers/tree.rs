//! Tree listing and node mutation handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use explorer_core::types::ApiEnvelope;
use explorer_entity::node::{Node, NodeType};

use crate::dto::request::{CreateNodeRequest, RenameRequest};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /api/tree
pub async fn get_tree(
    State(state): State<AppState>,
) -> Result<Json<ApiEnvelope<Vec<Node>>>, ApiError> {
    let nodes = state.tree_service.list_all().await?;
    Ok(Json(ApiEnvelope::ok(nodes)))
}

/// POST /api/folder
pub async fn create_folder(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateNodeRequest>,
) -> Result<(StatusCode, Json<ApiEnvelope<Node>>), ApiError> {
    create(&state, NodeType::Folder, req).await
}

/// POST /api/file
pub async fn create_file(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateNodeRequest>,
) -> Result<(StatusCode, Json<ApiEnvelope<Node>>), ApiError> {
    create(&state, NodeType::File, req).await
}

async fn create(
    state: &AppState,
    node_type: NodeType,
    req: CreateNodeRequest,
) -> Result<(StatusCode, Json<ApiEnvelope<Node>>), ApiError> {
    let node = state
        .tree_service
        .create_node(&req.name, node_type, req.parent_id.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiEnvelope::ok(node))))
}

/// PUT /api/rename
pub async fn rename_node(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RenameRequest>,
) -> Result<Json<ApiEnvelope<Node>>, ApiError> {
    let node = state.tree_service.rename_node(&req.id, &req.name).await?;
    Ok(Json(ApiEnvelope::ok(node)))
}

/// DELETE /api/node/{id}
pub async fn delete_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiEnvelope<()>>, ApiError> {
    state.tree_service.delete_node(&id).await?;
    Ok(Json(ApiEnvelope::message("Node deleted successfully")))
}
