//! The backend seam the services are written against.

use async_trait::async_trait;
use tokio::sync::broadcast;

use notesgpt_core::events::SessionEvent;
use notesgpt_core::result::AppResult;
use notesgpt_core::types::{FolderId, NoteId, PageRequest};
use notesgpt_entity::folder::{CreateFolder, Folder, UpdateFolder};
use notesgpt_entity::note::{CreateNote, Note};
use notesgpt_entity::session::{Session, SocialCredential};
use notesgpt_entity::user::{RegisterUser, User};

use crate::client::ApiClient;
use crate::dto::AudioUpload;

/// Every backend operation the client state depends on.
///
/// [`ApiClient`] is the production implementation. Implementations must
/// clear the stored token and publish
/// [`SessionEvent::AuthenticationRequired`] whenever the backend rejects
/// the session.
#[async_trait]
pub trait NotesBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Subscribe to session events.
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;

    /// Read the stored bearer token.
    async fn stored_token(&self) -> AppResult<Option<String>>;

    /// Clear the stored token and publish [`SessionEvent::LoggedOut`].
    async fn logout(&self) -> AppResult<()>;

    /// Exchange credentials for a session.
    async fn login(&self, email: &str, password: &str) -> AppResult<Session>;

    /// Exchange a platform sign-in credential for a session.
    async fn social_login(&self, credential: &SocialCredential) -> AppResult<Session>;

    /// Create an account.
    async fn register(&self, user: &RegisterUser) -> AppResult<User>;

    /// Activate an account.
    async fn activate(&self, token: &str) -> AppResult<User>;

    /// Create a text note.
    async fn create_note(&self, note: &CreateNote) -> AppResult<Note>;

    /// List notes, optionally scoped to a folder.
    async fn list_notes(&self, page: PageRequest, folder_id: Option<FolderId>)
    -> AppResult<Vec<Note>>;

    /// Fetch one note.
    async fn get_note(&self, id: NoteId) -> AppResult<Note>;

    /// Delete one note.
    async fn delete_note(&self, id: NoteId) -> AppResult<()>;

    /// Move a note to another folder (`None` = root).
    async fn move_note(&self, id: NoteId, folder_id: Option<FolderId>) -> AppResult<Note>;

    /// Create a folder.
    async fn create_folder(&self, folder: &CreateFolder) -> AppResult<Folder>;

    /// List folders directly under `parent_id` (`None` = root).
    async fn list_folders(&self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>>;

    /// Fetch one folder.
    async fn get_folder(&self, id: FolderId) -> AppResult<Folder>;

    /// Update a folder's fields.
    async fn update_folder(&self, id: FolderId, update: &UpdateFolder) -> AppResult<Folder>;

    /// Delete a folder.
    async fn delete_folder(&self, id: FolderId) -> AppResult<()>;

    /// Ask a question about a folder's notes.
    async fn query_folder(&self, id: FolderId, query: &str) -> AppResult<String>;

    /// Upload audio for transcription and summarization.
    async fn process_audio(&self, upload: &AudioUpload) -> AppResult<Note>;
}

#[async_trait]
impl NotesBackend for ApiClient {
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        ApiClient::subscribe(self)
    }

    async fn stored_token(&self) -> AppResult<Option<String>> {
        ApiClient::stored_token(self).await
    }

    async fn logout(&self) -> AppResult<()> {
        ApiClient::logout(self).await
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        ApiClient::login(self, email, password).await
    }

    async fn social_login(&self, credential: &SocialCredential) -> AppResult<Session> {
        ApiClient::social_login(self, credential).await
    }

    async fn register(&self, user: &RegisterUser) -> AppResult<User> {
        ApiClient::register(self, user).await
    }

    async fn activate(&self, token: &str) -> AppResult<User> {
        ApiClient::activate(self, token).await
    }

    async fn create_note(&self, note: &CreateNote) -> AppResult<Note> {
        ApiClient::create_note(self, note).await
    }

    async fn list_notes(
        &self,
        page: PageRequest,
        folder_id: Option<FolderId>,
    ) -> AppResult<Vec<Note>> {
        ApiClient::list_notes(self, page, folder_id).await
    }

    async fn get_note(&self, id: NoteId) -> AppResult<Note> {
        ApiClient::get_note(self, id).await
    }

    async fn delete_note(&self, id: NoteId) -> AppResult<()> {
        ApiClient::delete_note(self, id).await
    }

    async fn move_note(&self, id: NoteId, folder_id: Option<FolderId>) -> AppResult<Note> {
        ApiClient::move_note(self, id, folder_id).await
    }

    async fn create_folder(&self, folder: &CreateFolder) -> AppResult<Folder> {
        ApiClient::create_folder(self, folder).await
    }

    async fn list_folders(&self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>> {
        ApiClient::list_folders(self, parent_id).await
    }

    async fn get_folder(&self, id: FolderId) -> AppResult<Folder> {
        ApiClient::get_folder(self, id).await
    }

    async fn update_folder(&self, id: FolderId, update: &UpdateFolder) -> AppResult<Folder> {
        ApiClient::update_folder(self, id, update).await
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        ApiClient::delete_folder(self, id).await
    }

    async fn query_folder(&self, id: FolderId, query: &str) -> AppResult<String> {
        ApiClient::query_folder(self, id, query).await
    }

    async fn process_audio(&self, upload: &AudioUpload) -> AppResult<Note> {
        ApiClient::process_audio(self, upload).await
    }
}
