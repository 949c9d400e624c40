//! Typed wrappers over the backend routes, grouped by resource.

pub mod auth;
pub mod folders;
pub mod notes;
pub mod process;
