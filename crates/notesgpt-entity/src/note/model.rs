//! Note entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notesgpt_core::types::{FolderId, NoteId, UserId};

/// A voice note: the uploaded recording plus its transcript and AI summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique note identifier.
    pub id: NoteId,
    /// Note title.
    pub title: String,
    /// Reference to the audio file the note was produced from.
    #[serde(rename = "audio_file_path", default)]
    pub audio_uri: String,
    /// Transcript of the recording, once processed.
    #[serde(
        default,
        deserialize_with = "super::text::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub transcript: Option<String>,
    /// AI summary of the transcript, once processed.
    #[serde(
        default,
        deserialize_with = "super::text::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<String>,
    /// When the note was created.
    pub created_at: DateTime<Utc>,
    /// When the note was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// The note owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Owning folder (`None` at root).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<FolderId>,
    /// Whether the note exists on the backend. Never sent by the server;
    /// set by the client on every note it receives from the API.
    #[serde(default)]
    pub from_backend: bool,
}

impl Note {
    /// Check whether this note is listed directly in `folder`.
    pub fn is_in(&self, folder: Option<FolderId>) -> bool {
        self.folder_id == folder
    }

    /// Mark the note as received from the backend.
    pub fn into_remote(mut self) -> Self {
        self.from_backend = true;
        self
    }
}

/// Payload for `POST /v1/notes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNote {
    /// Note title.
    pub title: String,
    /// Note content.
    pub content: String,
}
