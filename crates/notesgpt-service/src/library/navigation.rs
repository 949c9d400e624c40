//! Folder cursor and breadcrumb path.
//!
//! A navigation request is resolved once into an explicit
//! [`NavigationStep`] and then applied, instead of inferring the direction
//! from path membership at apply time.

use serde::{Deserialize, Serialize};

use notesgpt_core::types::FolderId;
use notesgpt_entity::folder::FolderCrumb;

/// The cursor plus the ancestor chain from root to it.
///
/// Invariant: `path` ends at `current_folder_id` and is empty iff the cursor
/// is root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    /// The active folder (`None` = root).
    current_folder_id: Option<FolderId>,
    /// Breadcrumb path from root to the active folder.
    path: Vec<FolderCrumb>,
}

/// A resolved navigation action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationStep {
    /// Target equals the cursor: keep state, re-fetch listings.
    Refresh(Option<FolderId>),
    /// Back to root: empty path.
    GoToRoot,
    /// Jump back to the path entry at `index`, dropping everything after it.
    GoToAncestor {
        /// Index of the target in the current path.
        index: usize,
    },
    /// Descend into a folder not on the path.
    Descend(FolderCrumb),
}

impl NavigationState {
    /// State positioned at root.
    pub fn root() -> Self {
        Self::default()
    }

    /// The active folder (`None` = root).
    pub fn current_folder_id(&self) -> Option<FolderId> {
        self.current_folder_id
    }

    /// Breadcrumb path from root to the active folder.
    pub fn path(&self) -> &[FolderCrumb] {
        &self.path
    }

    /// Whether the cursor is at root.
    pub fn is_root(&self) -> bool {
        self.current_folder_id.is_none()
    }

    /// Whether `folder_id` is the active folder.
    pub fn is_current(&self, folder_id: Option<FolderId>) -> bool {
        self.current_folder_id == folder_id
    }

    /// The entry before the cursor, if the path has more than one entry.
    pub fn parent(&self) -> Option<&FolderCrumb> {
        self.path.len().checked_sub(2).map(|i| &self.path[i])
    }

    /// Resolve a navigation request.
    ///
    /// `name` is only consulted when descending; `None` is returned when a
    /// descent has no name to show in the breadcrumb.
    pub fn resolve(&self, target: Option<FolderId>, name: Option<&str>) -> Option<NavigationStep> {
        if target == self.current_folder_id {
            return Some(NavigationStep::Refresh(target));
        }

        let Some(id) = target else {
            return Some(NavigationStep::GoToRoot);
        };

        if let Some(index) = self.path.iter().position(|crumb| crumb.id == id) {
            return Some(NavigationStep::GoToAncestor { index });
        }

        name.map(|name| NavigationStep::Descend(FolderCrumb::new(id, name)))
    }

    /// Apply a resolved step. Returns the new cursor.
    pub fn apply(&mut self, step: NavigationStep) -> Option<FolderId> {
        match step {
            NavigationStep::Refresh(_) => {}
            NavigationStep::GoToRoot => {
                self.current_folder_id = None;
                self.path.clear();
            }
            NavigationStep::GoToAncestor { index } => {
                self.path.truncate(index + 1);
                self.current_folder_id = self.path.last().map(|crumb| crumb.id);
            }
            NavigationStep::Descend(crumb) => {
                self.current_folder_id = Some(crumb.id);
                self.path.push(crumb);
            }
        }
        self.current_folder_id
    }

    /// Rename every breadcrumb entry for `folder_id`.
    pub fn rename(&mut self, folder_id: FolderId, name: &str) {
        for crumb in self.path.iter_mut().filter(|crumb| crumb.id == folder_id) {
            crumb.name = name.to_string();
        }
    }
}
