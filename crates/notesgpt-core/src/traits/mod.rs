//! Core traits defined in `notesgpt-core` and implemented by other crates.

pub mod store;

pub use store::KeyValueStore;
