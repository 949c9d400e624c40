//! # notesgpt-service
//!
//! Client-side state for NotesGPT. [`AuthService`] owns the session state
//! machine, [`LibraryService`] owns the folder cursor and the listings scoped
//! to it, and [`AppSession`] wires both to one [`ApiClient`] for the
//! lifetime of the process.
//!
//! Services receive their dependencies at construction time; nothing is
//! global.
//!
//! [`ApiClient`]: notesgpt_client::ApiClient

pub mod auth;
pub mod library;
pub mod session;

#[cfg(test)]
mod testing;

pub use auth::{AuthService, AuthSnapshot, AuthStatus};
pub use library::{LibraryService, LibrarySnapshot, NavigationState, NavigationStep, NoteSource};
pub use session::AppSession;
