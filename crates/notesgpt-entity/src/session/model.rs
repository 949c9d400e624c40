//! Client session model.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// The single active session of this client process.
///
/// A session restored from the local store at startup carries only the
/// token; the user record is filled in on the next explicit login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The bearer token attached to every request.
    pub token: String,
    /// The authenticated user, when known.
    pub user: Option<User>,
}

impl Session {
    /// Session restored from a stored token.
    pub fn restored(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user: None,
        }
    }

    /// Session established by an explicit login.
    pub fn established(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user: Some(user),
        }
    }
}
