//! Auth status and the observable auth snapshot.

use serde::{Deserialize, Serialize};

use notesgpt_entity::user::User;

/// Where the session state machine currently is.
///
/// `Loading` is only ever the initial state; from there the machine moves to
/// `Anonymous` or `Authenticated` and alternates between the two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// The stored token has not been inspected yet.
    #[default]
    Loading,
    /// No session.
    Anonymous,
    /// A token is stored and has not been rejected.
    Authenticated,
}

impl AuthStatus {
    /// Whether a session is active.
    pub fn is_authenticated(self) -> bool {
        self == Self::Authenticated
    }
}

impl std::fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Anonymous => write!(f, "anonymous"),
            Self::Authenticated => write!(f, "authenticated"),
        }
    }
}

/// Point-in-time copy of the auth state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthSnapshot {
    /// Session status.
    pub status: AuthStatus,
    /// The logged-in user. Unknown for a session restored from the store.
    pub user: Option<User>,
    /// Message of the last failed operation.
    pub error: Option<String>,
    /// Whether an operation is in flight.
    pub loading: bool,
}

impl AuthSnapshot {
    /// Drop the session, keeping nothing but `error`.
    pub(crate) fn sign_out(&mut self) {
        self.status = AuthStatus::Anonymous;
        self.user = None;
        self.loading = false;
    }
}
