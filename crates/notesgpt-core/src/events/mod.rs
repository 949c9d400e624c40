//! Session events emitted by the API client.
//!
//! Events are broadcast over a `tokio::sync::broadcast` channel and consumed
//! by the auth state, which in turn drives the library state.

use serde::{Deserialize, Serialize};

/// Capacity of the session event broadcast channel.
pub const SESSION_EVENT_CAPACITY: usize = 16;

/// Events related to the single active session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A token was stored after a successful login.
    Established,
    /// The backend answered 401 on some endpoint; the stored token is gone.
    AuthenticationRequired {
        /// The request path that triggered it.
        path: String,
    },
    /// The user logged out and the stored token was cleared.
    LoggedOut,
}
