//! Folder navigation and the note/folder listings of the active folder.

pub mod navigation;
pub mod service;

pub use navigation::{NavigationState, NavigationStep};
pub use service::{LibraryService, LibrarySnapshot, NoteSource};
