//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /folder` and `POST /file`.
///
/// A missing name is treated as empty so the service can report the
/// type-specific "name is required" message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeRequest {
    /// Requested name, trimmed by the service.
    #[serde(default)]
    pub name: String,
    /// Parent folder id; absent, `null` or `""` means root level.
    #[serde(default)]
    #[validate(length(max = 64, message = "Invalid parent ID"))]
    pub parent_id: Option<String>,
}

/// Body of `PUT /rename`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RenameRequest {
    /// Node to rename.
    #[serde(default)]
    #[validate(length(min = 1, message = "Valid node ID is required"))]
    pub id: String,
    /// New name, trimmed by the service.
    #[serde(default)]
    pub name: String,
}
