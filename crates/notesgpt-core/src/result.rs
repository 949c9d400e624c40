//! Convenience result type alias for NotesGPT.

use crate::error::AppError;

/// A specialized `Result` type for NotesGPT operations.
pub type AppResult<T> = Result<T, AppError>;
