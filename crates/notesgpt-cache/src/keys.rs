//! Key builders for every entry the client keeps in the local store.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use notesgpt_core::types::FolderId;

/// Prefix applied to all NotesGPT store keys.
const PREFIX: &str = "notesgpt";

/// Key holding the bearer token of the active session.
pub fn auth_token() -> String {
    format!("{PREFIX}:auth_token")
}

/// Whether a key must survive capacity eviction in bounded stores.
pub fn is_pinned(key: &str) -> bool {
    key == auth_token()
}

/// Key holding the last successfully fetched note listing of a folder.
pub fn recordings(folder_id: Option<FolderId>) -> String {
    match folder_id {
        Some(id) => format!("{PREFIX}:recordings:{id}"),
        None => format!("{PREFIX}:recordings:root"),
    }
}

/// Prefix covering every note listing snapshot.
pub fn recordings_prefix() -> String {
    format!("{PREFIX}:recordings:")
}
