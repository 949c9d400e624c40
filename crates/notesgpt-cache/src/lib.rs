//! # notesgpt-cache
//!
//! Device-local key-value stores for the NotesGPT client. Supports two modes:
//!
//! - **memory**: in-process store using [moka](https://crates.io/crates/moka)
//! - **file**: a single JSON object on disk, rewritten atomically
//!
//! The provider is selected at runtime based on configuration.

#[cfg(feature = "file")]
pub mod file;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::StoreManager;
