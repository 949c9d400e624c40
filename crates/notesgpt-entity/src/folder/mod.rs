//! Folder domain entities.

pub mod crumb;
pub mod model;

pub use crumb::FolderCrumb;
pub use model::{CreateFolder, Folder, UpdateFolder};
