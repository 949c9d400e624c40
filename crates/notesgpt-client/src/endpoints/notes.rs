//! Note routes.

use reqwest::Method;

use notesgpt_core::result::AppResult;
use notesgpt_core::types::{FolderId, NoteId, PageRequest};
use notesgpt_entity::note::{CreateNote, Note};

use crate::body::RequestBody;
use crate::client::ApiClient;
use crate::dto::{MoveNoteRequest, NoteEnvelope, NotesEnvelope};

impl ApiClient {
    /// `POST /v1/notes`
    pub async fn create_note(&self, note: &CreateNote) -> AppResult<Note> {
        let body = RequestBody::json(note)?;
        let envelope: NoteEnvelope = self
            .request_as(Method::POST, "/v1/notes", &[], body)
            .await?;
        Ok(envelope.note.into_remote())
    }

    /// `GET /v1/notes?page&page_size[&folder_id]`
    ///
    /// Without a folder the backend lists every note of the user.
    pub async fn list_notes(
        &self,
        page: PageRequest,
        folder_id: Option<FolderId>,
    ) -> AppResult<Vec<Note>> {
        let mut query = page.query_pairs().to_vec();
        if let Some(folder_id) = folder_id {
            query.push(("folder_id", folder_id.to_string()));
        }
        let envelope: NotesEnvelope = self
            .request_as(Method::GET, "/v1/notes", &query, RequestBody::Empty)
            .await?;
        Ok(envelope
            .notes
            .unwrap_or_default()
            .into_iter()
            .map(Note::into_remote)
            .collect())
    }

    /// `GET /v1/notes/{id}`
    pub async fn get_note(&self, id: NoteId) -> AppResult<Note> {
        let envelope: NoteEnvelope = self
            .request_as(Method::GET, &format!("/v1/notes/{id}"), &[], RequestBody::Empty)
            .await?;
        Ok(envelope.note.into_remote())
    }

    /// `DELETE /v1/notes/{id}`
    pub async fn delete_note(&self, id: NoteId) -> AppResult<()> {
        self.request(Method::DELETE, &format!("/v1/notes/{id}"), &[], RequestBody::Empty)
            .await?;
        Ok(())
    }

    /// `PUT /v1/notes/{id}/move`: only the note's folder changes.
    pub async fn move_note(&self, id: NoteId, folder_id: Option<FolderId>) -> AppResult<Note> {
        let body = RequestBody::json(&MoveNoteRequest { folder_id })?;
        let envelope: NoteEnvelope = self
            .request_as(Method::PUT, &format!("/v1/notes/{id}/move"), &[], body)
            .await?;
        Ok(envelope.note.into_remote())
    }
}
