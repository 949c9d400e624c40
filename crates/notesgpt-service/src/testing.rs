//! In-memory backend for service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::broadcast;

use notesgpt_client::{AudioUpload, NotesBackend};
use notesgpt_core::error::AppError;
use notesgpt_core::events::{SESSION_EVENT_CAPACITY, SessionEvent};
use notesgpt_core::result::AppResult;
use notesgpt_core::types::{FolderId, NoteId, PageRequest, UserId};
use notesgpt_entity::folder::{CreateFolder, Folder, UpdateFolder};
use notesgpt_entity::note::{CreateNote, Note};
use notesgpt_entity::session::{Session, SocialCredential};
use notesgpt_entity::user::{RegisterUser, User};

#[derive(Debug, Default)]
struct Inner {
    token: Option<String>,
    folders: Vec<Folder>,
    notes: Vec<Note>,
    next_error: Option<AppError>,
    notes_offline: bool,
    calls: Vec<&'static str>,
}

#[derive(Debug)]
pub struct FakeBackend {
    inner: Mutex<Inner>,
    events: broadcast::Sender<SessionEvent>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        let (events, _) = broadcast::channel(SESSION_EVENT_CAPACITY);
        Self {
            inner: Mutex::new(Inner::default()),
            events,
        }
    }
}

pub fn folder(id: i64, name: &str, parent: Option<i64>) -> Folder {
    Folder {
        id: FolderId(id),
        name: name.to_string(),
        parent_id: parent.map(FolderId),
        user_id: Some(UserId(1)),
        created_at: Some(Utc::now()),
        updated_at: None,
        version: 1,
    }
}

pub fn note(id: i64, title: &str, folder: Option<i64>) -> Note {
    Note {
        id: NoteId(id),
        title: title.to_string(),
        audio_uri: format!("uploads/{id}.mp3"),
        transcript: None,
        summary: None,
        created_at: Utc::now(),
        updated_at: None,
        user_id: Some(UserId(1)),
        folder_id: folder.map(FolderId),
        from_backend: false,
    }
}

fn user(email: &str) -> User {
    User {
        id: UserId(1),
        name: "Ada".to_string(),
        email: email.to_string(),
        activated: true,
        role: "user".to_string(),
        created_at: None,
    }
}

impl FakeBackend {
    pub fn with_data(folders: Vec<Folder>, notes: Vec<Note>) -> Self {
        let backend = Self::default();
        {
            let mut inner = backend.inner.lock().unwrap();
            inner.folders = folders;
            inner.notes = notes;
        }
        backend
    }

    pub fn set_token(&self, token: Option<&str>) {
        self.inner.lock().unwrap().token = token.map(str::to_string);
    }

    pub fn stored(&self) -> Option<String> {
        self.inner.lock().unwrap().token.clone()
    }

    /// Make the next backend call fail with `err`.
    pub fn fail_next(&self, err: AppError) {
        self.inner.lock().unwrap().next_error = Some(err);
    }

    pub fn set_notes_offline(&self, offline: bool) {
        self.inner.lock().unwrap().notes_offline = offline;
    }

    /// Behave like the API client after a 401.
    pub fn reject_session(&self, path: &str) {
        self.inner.lock().unwrap().token = None;
        let _ = self.events.send(SessionEvent::AuthenticationRequired {
            path: path.to_string(),
        });
    }

    pub fn calls(&self, op: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| **c == op)
            .count()
    }

    pub fn folder_names(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner.folders.iter().map(|f| f.name.clone()).collect()
    }

    fn call(&self, op: &'static str) -> AppResult<std::sync::MutexGuard<'_, Inner>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(op);
        match inner.next_error.take() {
            Some(err) => Err(err),
            None => Ok(inner),
        }
    }

    fn establish(&self, email: &str) -> AppResult<Session> {
        let token = format!("token-{email}");
        self.call("login")?.token = Some(token.clone());
        let _ = self.events.send(SessionEvent::Established);
        Ok(Session::established(token, user(email)))
    }
}

#[async_trait]
impl NotesBackend for FakeBackend {
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    async fn stored_token(&self) -> AppResult<Option<String>> {
        Ok(self.stored())
    }

    async fn logout(&self) -> AppResult<()> {
        let result = self.call("logout").map(|mut inner| inner.token = None);
        let _ = self.events.send(SessionEvent::LoggedOut);
        result
    }

    async fn login(&self, email: &str, _password: &str) -> AppResult<Session> {
        self.establish(email)
    }

    async fn social_login(&self, credential: &SocialCredential) -> AppResult<Session> {
        if !credential.has_subject() {
            return Err(AppError::validation("missing subject"));
        }
        self.establish(&credential.email)
    }

    async fn register(&self, new_user: &RegisterUser) -> AppResult<User> {
        self.call("register")?;
        Ok(User {
            activated: false,
            ..user(&new_user.email)
        })
    }

    async fn activate(&self, _token: &str) -> AppResult<User> {
        self.call("activate")?;
        Ok(user("ada@example.com"))
    }

    async fn create_note(&self, new_note: &CreateNote) -> AppResult<Note> {
        let mut inner = self.call("create_note")?;
        let id = inner.notes.iter().map(|n| n.id.get()).max().unwrap_or(0) + 1;
        let created = note(id, &new_note.title, None).into_remote();
        inner.notes.push(created.clone());
        Ok(created)
    }

    async fn list_notes(
        &self,
        page: PageRequest,
        folder_id: Option<FolderId>,
    ) -> AppResult<Vec<Note>> {
        let inner = self.call("list_notes")?;
        if inner.notes_offline {
            return Err(AppError::network("Backend unreachable"));
        }
        Ok(inner
            .notes
            .iter()
            .filter(|n| n.is_in(folder_id))
            .take(page.page_size as usize)
            .cloned()
            .map(Note::into_remote)
            .collect())
    }

    async fn get_note(&self, id: NoteId) -> AppResult<Note> {
        let inner = self.call("get_note")?;
        inner
            .notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .map(Note::into_remote)
            .ok_or_else(|| AppError::request_failed(404, "not found"))
    }

    async fn delete_note(&self, id: NoteId) -> AppResult<()> {
        self.call("delete_note")?.notes.retain(|n| n.id != id);
        Ok(())
    }

    async fn move_note(&self, id: NoteId, folder_id: Option<FolderId>) -> AppResult<Note> {
        let mut inner = self.call("move_note")?;
        let note = inner
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| AppError::request_failed(404, "not found"))?;
        note.folder_id = folder_id;
        Ok(note.clone().into_remote())
    }

    async fn create_folder(&self, new_folder: &CreateFolder) -> AppResult<Folder> {
        let mut inner = self.call("create_folder")?;
        let id = inner.folders.iter().map(|f| f.id.get()).max().unwrap_or(0) + 1;
        let created = folder(id, &new_folder.name, new_folder.parent_id.map(|p| p.get()));
        inner.folders.push(created.clone());
        Ok(created)
    }

    async fn list_folders(&self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>> {
        let inner = self.call("list_folders")?;
        Ok(inner
            .folders
            .iter()
            .filter(|f| f.is_child_of(parent_id))
            .cloned()
            .collect())
    }

    async fn get_folder(&self, id: FolderId) -> AppResult<Folder> {
        let inner = self.call("get_folder")?;
        inner
            .folders
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| AppError::request_failed(404, "not found"))
    }

    async fn update_folder(&self, id: FolderId, update: &UpdateFolder) -> AppResult<Folder> {
        let mut inner = self.call("update_folder")?;
        let folder = inner
            .folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| AppError::request_failed(404, "not found"))?;
        if let Some(name) = &update.name {
            folder.name = name.clone();
        }
        folder.version += 1;
        Ok(folder.clone())
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        self.call("delete_folder")?.folders.retain(|f| f.id != id);
        Ok(())
    }

    async fn query_folder(&self, id: FolderId, query: &str) -> AppResult<String> {
        let inner = self.call("query_folder")?;
        let count = inner.notes.iter().filter(|n| n.is_in(Some(id))).count();
        Ok(format!("{count} notes mention {query}"))
    }

    async fn process_audio(&self, upload: &AudioUpload) -> AppResult<Note> {
        let mut inner = self.call("process_audio")?;
        let id = inner.notes.iter().map(|n| n.id.get()).max().unwrap_or(0) + 1;
        let mut created = note(id, &upload.title, upload.folder_id.map(|f| f.get()));
        created.transcript = Some("transcribed".to_string());
        created.summary = Some("summarized".to_string());
        inner.notes.push(created.clone());
        Ok(created.into_remote())
    }
}
