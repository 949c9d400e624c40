//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notesgpt_core::types::UserId;

/// A registered NotesGPT user as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address used to log in.
    pub email: String,
    /// Whether the account was activated with the emailed token.
    #[serde(default)]
    pub activated: bool,
    /// Backend role name.
    #[serde(default)]
    pub role: String,
    /// When the account was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /v1/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plain-text password, sent over TLS only.
    pub password: String,
}
