//! Note domain entities.

pub mod model;
pub mod text;

pub use model::{CreateNote, Note};
