//! # notesgpt-client
//!
//! The single chokepoint for every NotesGPT backend call. [`ApiClient`]
//! attaches the stored bearer token, derives the request content type,
//! clears the session on HTTP 401 and normalizes every other failure into
//! an [`AppError`](notesgpt_core::AppError).
//!
//! Services depend on the [`NotesBackend`] trait rather than on the
//! concrete client.

pub mod backend;
pub mod body;
pub mod client;
pub mod dto;
pub mod endpoints;
pub mod response;

pub use backend::NotesBackend;
pub use body::RequestBody;
pub use client::ApiClient;
pub use dto::AudioUpload;
