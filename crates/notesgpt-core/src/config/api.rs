//! Backend API client configuration.

use serde::{Deserialize, Serialize};

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the NotesGPT backend, without a trailing `/v1`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Page size used when listing the notes of a folder.
    #[serde(default = "default_notes_page_size")]
    pub notes_page_size: u64,
    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
            notes_page_size: default_notes_page_size(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_notes_page_size() -> u64 {
    100
}

fn default_user_agent() -> String {
    format!("notesgpt-client/{}", env!("CARGO_PKG_VERSION"))
}
