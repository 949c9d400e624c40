//! Breadcrumb entries for folder navigation.

use serde::{Deserialize, Serialize};

use notesgpt_core::types::FolderId;

use super::model::Folder;

/// One entry of the breadcrumb path from root to the current folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderCrumb {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name as shown in the breadcrumb.
    pub name: String,
}

impl FolderCrumb {
    /// Create a breadcrumb entry.
    pub fn new(id: FolderId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl From<&Folder> for FolderCrumb {
    fn from(folder: &Folder) -> Self {
        Self::new(folder.id, folder.name.clone())
    }
}
