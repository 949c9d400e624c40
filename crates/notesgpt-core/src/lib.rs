//! # notesgpt-core
//!
//! Core crate for the NotesGPT client. Contains the configuration schema,
//! typed identifiers, pagination types, the local store trait, session
//! events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other NotesGPT crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
