//! Audio processing route.

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::info;

use notesgpt_core::error::{AppError, ErrorKind};
use notesgpt_core::result::AppResult;
use notesgpt_entity::note::Note;

use crate::body::RequestBody;
use crate::client::ApiClient;
use crate::dto::{AudioUpload, NoteEnvelope};

/// MIME type declared for uploaded recordings.
const AUDIO_MIME: &str = "audio/mp3";

impl ApiClient {
    /// `POST /v1/process/notes/gemini`: upload audio for transcription and
    /// summarization. The backend answers immediately with the created note;
    /// transcript and summary are filled in asynchronously.
    pub async fn process_audio(&self, upload: &AudioUpload) -> AppResult<Note> {
        let form = build_form(upload).await?;
        let envelope: NoteEnvelope = self
            .request_as(
                Method::POST,
                "/v1/process/notes/gemini",
                &[],
                RequestBody::Multipart(form),
            )
            .await?;
        info!(note_id = %envelope.note.id, "Audio accepted for processing");
        Ok(envelope.note.into_remote())
    }
}

async fn build_form(upload: &AudioUpload) -> AppResult<Form> {
    let audio = tokio::fs::read(&upload.path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Validation,
            format!("Cannot read audio file '{}': {e}", upload.path.display()),
            e,
        )
    })?;

    let part = Part::bytes(audio)
        .file_name(upload.file_name())
        .mime_str(AUDIO_MIME)
        .map_err(|e| AppError::internal(format!("Invalid audio MIME type: {e}")))?;

    let mut form = Form::new()
        .part("audio", part)
        .text("title", upload.title.clone());
    if !upload.prompt.trim().is_empty() {
        form = form.text("prompt", upload.prompt.clone());
    }
    form = form.text("language", upload.language.clone());
    if let Some(folder_id) = upload.folder_id {
        form = form.text("folder_id", folder_id.to_string());
    }
    Ok(form)
}
