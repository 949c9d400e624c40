//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notesgpt_core::types::{FolderId, UserId};

/// A folder in the user's note hierarchy.
///
/// Folders form a tree through `parent_id`. A folder is only ever created
/// under an existing parent and is never reparented by this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (`None` for root-level folders).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<FolderId>,
    /// The folder owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// When the folder was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the folder was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Optimistic-locking version maintained by the backend.
    #[serde(default)]
    pub version: i32,
}

impl Folder {
    /// Check if this is a root-level folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check whether this folder is listed directly under `parent`.
    pub fn is_child_of(&self, parent: Option<FolderId>) -> bool {
        self.parent_id == parent
    }
}

/// Payload for `POST /v1/folders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Parent folder (omitted for root).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<FolderId>,
}

/// Payload for `PUT /v1/folders/{id}`. Only present fields are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFolder {
    /// New folder name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
