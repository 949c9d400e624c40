//! Request payloads and response envelopes of the backend API.
//!
//! The backend wraps every resource in a single-key envelope such as
//! `{"note": {...}}` or `{"folders": [...]}`. Empty lists arrive as
//! `null`, so list envelopes default to empty.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use notesgpt_core::types::FolderId;
use notesgpt_entity::folder::Folder;
use notesgpt_entity::note::Note;
use notesgpt_entity::session::AuthenticationToken;
use notesgpt_entity::user::User;

/// Body of `POST /v1/tokens/authentication`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    /// Account email.
    pub email: &'a str,
    /// Account password.
    pub password: &'a str,
}

/// Body of `PUT /v1/users/activated`.
#[derive(Debug, Serialize)]
pub struct ActivateRequest<'a> {
    /// Activation token from the welcome email.
    pub token: &'a str,
}

/// Body of `PUT /v1/notes/{id}/move`. `null` moves the note to root.
#[derive(Debug, Serialize)]
pub struct MoveNoteRequest {
    /// Destination folder.
    pub folder_id: Option<FolderId>,
}

/// Body of `POST /v1/folders/{id}/query`.
#[derive(Debug, Serialize)]
pub struct QueryFolderRequest<'a> {
    /// Natural-language question about the folder's notes.
    pub query: &'a str,
}

/// Response of the token endpoints.
#[derive(Debug, Deserialize)]
pub struct AuthenticationResponse {
    /// The issued token, absent on misbehaving backends.
    #[serde(default)]
    pub authentication_token: Option<AuthenticationToken>,
    /// The authenticated user.
    #[serde(default)]
    pub user: Option<User>,
}

/// `{"user": ...}`
#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    /// The user.
    pub user: User,
}

/// `{"note": ...}`
#[derive(Debug, Deserialize)]
pub struct NoteEnvelope {
    /// The note.
    pub note: Note,
}

/// `{"notes": [...]}`
#[derive(Debug, Deserialize)]
pub struct NotesEnvelope {
    /// The notes of the requested page.
    #[serde(default)]
    pub notes: Option<Vec<Note>>,
}

/// `{"folder": ...}`
#[derive(Debug, Deserialize)]
pub struct FolderEnvelope {
    /// The folder.
    pub folder: Folder,
}

/// `{"folders": [...]}`
#[derive(Debug, Deserialize)]
pub struct FoldersEnvelope {
    /// The folders directly under the requested parent.
    #[serde(default)]
    pub folders: Option<Vec<Folder>>,
}

/// `{"answer": ...}`
#[derive(Debug, Deserialize)]
pub struct AnswerEnvelope {
    /// The generated answer. Usually a string.
    pub answer: serde_json::Value,
}

/// Audio submitted for transcription and summarization.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    /// Local path of the recorded audio file.
    pub path: PathBuf,
    /// Title of the resulting note.
    pub title: String,
    /// Optional custom summarization prompt; blank prompts are not sent.
    pub prompt: String,
    /// Transcription language.
    pub language: String,
    /// Destination folder (root when `None`).
    pub folder_id: Option<FolderId>,
}

impl AudioUpload {
    /// Upload with the backend defaults: "Voice Note", no prompt, English.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            title: "Voice Note".to_string(),
            prompt: String::new(),
            language: "english".to_string(),
            folder_id: None,
        }
    }

    /// Set the note title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set a custom summarization prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the transcription language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Place the note in a folder.
    pub fn in_folder(mut self, folder_id: Option<FolderId>) -> Self {
        self.folder_id = folder_id;
        self
    }

    /// File name sent with the audio part: the last path segment.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "recording.mp3".to_string())
    }
}
