//! Session state machine.

pub mod service;
pub mod state;

pub use service::AuthService;
pub use state::{AuthSnapshot, AuthStatus};
