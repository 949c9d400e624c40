//! # notesgpt-entity
//!
//! Domain entity models for the NotesGPT client. Every struct in this crate
//! mirrors a JSON object exchanged with the backend or a client-side value
//! object. All entities derive `Debug`, `Clone`, `Serialize` and
//! `Deserialize`.

pub mod folder;
pub mod note;
pub mod session;
pub mod user;
