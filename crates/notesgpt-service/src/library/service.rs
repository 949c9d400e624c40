//! Folder and note listings scoped to the navigation cursor.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use notesgpt_cache::StoreManager;
use notesgpt_cache::keys;
use notesgpt_client::{AudioUpload, NotesBackend};
use notesgpt_core::error::AppError;
use notesgpt_core::result::AppResult;
use notesgpt_core::traits::KeyValueStore;
use notesgpt_core::types::{FolderId, NoteId, PageRequest};
use notesgpt_entity::folder::{CreateFolder, Folder, UpdateFolder};
use notesgpt_entity::note::Note;

use super::navigation::{NavigationState, NavigationStep};
use crate::auth::AuthStatus;

/// Where the displayed note listing came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteSource {
    /// Fetched from the backend.
    #[default]
    Remote,
    /// The backend was unreachable; this is the last listing fetched for
    /// the folder and may be stale.
    LocalCache,
}

/// Point-in-time copy of the library state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    /// Cursor and breadcrumb path.
    pub navigation: NavigationState,
    /// Folders directly under the cursor.
    pub folders: Vec<Folder>,
    /// Notes directly in the cursor.
    pub notes: Vec<Note>,
    /// Origin of `notes`.
    pub note_source: NoteSource,
    /// Whether an operation is in flight.
    pub loading: bool,
    /// Message of the last failed operation.
    pub error: Option<String>,
}

/// Owns the navigation cursor and the listings of the active folder.
///
/// Mutations are sent to the backend and followed by a refresh; nothing is
/// applied optimistically except local note deletion. Listings fetched for a
/// folder that is no longer the cursor are discarded.
#[derive(Debug)]
pub struct LibraryService {
    /// Backend holding folders and notes.
    backend: Arc<dyn NotesBackend>,
    /// Local store for note listing snapshots.
    store: StoreManager,
    /// Page size for note listings.
    page_size: u64,
    /// Current state.
    state: RwLock<LibrarySnapshot>,
}

impl LibraryService {
    /// Creates a new library service positioned at root.
    pub fn new(backend: Arc<dyn NotesBackend>, store: StoreManager, page_size: u64) -> Self {
        Self {
            backend,
            store,
            page_size,
            state: RwLock::new(LibrarySnapshot::default()),
        }
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> LibrarySnapshot {
        self.state.read().await.clone()
    }

    /// The active folder (`None` = root).
    pub async fn current_folder_id(&self) -> Option<FolderId> {
        self.state.read().await.navigation.current_folder_id()
    }

    /// Move the cursor and reload both listings.
    ///
    /// Navigating to the active folder reloads it in place. Descending into
    /// a folder needs a breadcrumb name: `name`, or the name of the folder in
    /// the current listing. Without either the call fails and nothing
    /// changes. Fetch failures are recorded in [`LibrarySnapshot::error`].
    pub async fn navigate_to_folder(
        &self,
        folder_id: Option<FolderId>,
        name: Option<&str>,
    ) -> AppResult<()> {
        let step = {
            let state = self.state.read().await;
            let name = name.map(str::to_string).or_else(|| {
                state
                    .folders
                    .iter()
                    .find(|f| Some(f.id) == folder_id)
                    .map(|f| f.name.clone())
            });
            state.navigation.resolve(folder_id, name.as_deref())
        };

        let Some(step) = step else {
            let target = folder_id.map_or_else(|| "root".to_string(), |id| id.to_string());
            return Err(AppError::validation(format!(
                "Folder {target} is not in the current listing; pass its name to open it"
            )));
        };

        self.go(step).await;
        Ok(())
    }

    /// Reload both listings for the active folder.
    pub async fn refresh(&self) {
        let cursor = self.current_folder_id().await;
        self.load(cursor).await;
    }

    /// Create a folder under `parent_id`.
    ///
    /// The folder listing of `parent_id` is fetched afterwards and shown if
    /// `parent_id` is still the cursor.
    pub async fn add_folder(&self, name: &str, parent_id: Option<FolderId>) -> Option<Folder> {
        let name = name.trim();
        if name.is_empty() {
            self.reject("Folder name must not be empty").await;
            return None;
        }

        self.begin().await;
        let request = CreateFolder {
            name: name.to_string(),
            parent_id,
        };
        match self.backend.create_folder(&request).await {
            Ok(folder) => {
                info!(folder_id = %folder.id, name = %folder.name, "Folder created");
                self.refresh_folders(parent_id).await;
                self.done().await;
                Some(folder)
            }
            Err(e) => {
                self.fail("add_folder", e).await;
                None
            }
        }
    }

    /// Rename a folder, including its breadcrumb entry.
    pub async fn rename_folder(&self, folder_id: FolderId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            self.reject("Folder name must not be empty").await;
            return false;
        }

        self.begin().await;
        let update = UpdateFolder {
            name: Some(name.to_string()),
        };
        match self.backend.update_folder(folder_id, &update).await {
            Ok(folder) => {
                info!(%folder_id, name = %folder.name, "Folder renamed");
                let cursor = {
                    let mut state = self.state.write().await;
                    state.navigation.rename(folder_id, &folder.name);
                    state.navigation.current_folder_id()
                };
                self.refresh_folders(cursor).await;
                self.done().await;
                true
            }
            Err(e) => {
                self.fail("rename_folder", e).await;
                false
            }
        }
    }

    /// Delete a folder.
    ///
    /// Deleting the active folder moves the cursor to its parent (root for a
    /// top-level folder). Otherwise the cursor stays and its folder listing
    /// is reloaded.
    pub async fn remove_folder(&self, folder_id: FolderId) -> bool {
        self.begin().await;
        if let Err(e) = self.backend.delete_folder(folder_id).await {
            self.fail("remove_folder", e).await;
            return false;
        }
        info!(%folder_id, "Folder deleted");

        let (step, cursor) = {
            let state = self.state.read().await;
            let navigation = &state.navigation;
            let cursor = navigation.current_folder_id();
            let step = (cursor == Some(folder_id)).then(|| {
                match navigation.path().len().checked_sub(2) {
                    Some(index) => NavigationStep::GoToAncestor { index },
                    None => NavigationStep::GoToRoot,
                }
            });
            (step, cursor)
        };

        match step {
            Some(step) => self.go(step).await,
            None => {
                self.refresh_folders(cursor).await;
                self.done().await;
            }
        }
        true
    }

    /// Move a note to another folder (`None` = root).
    pub async fn move_recording(&self, note_id: NoteId, target: Option<FolderId>) -> bool {
        self.begin().await;
        match self.backend.move_note(note_id, target).await {
            Ok(_) => {
                info!(%note_id, destination = ?target, "Note moved");
                let cursor = self.current_folder_id().await;
                self.refresh_notes(cursor).await;
                self.done().await;
                true
            }
            Err(e) => {
                self.fail("move_recording", e).await;
                false
            }
        }
    }

    /// Delete a note.
    ///
    /// Notes that never reached the backend are only dropped locally. Notes
    /// not in the listing are assumed to be remote.
    pub async fn delete_recording(&self, note_id: NoteId) -> bool {
        self.begin().await;
        let remote = {
            let state = self.state.read().await;
            state
                .notes
                .iter()
                .find(|n| n.id == note_id)
                .is_none_or(|n| n.from_backend)
        };

        if remote {
            if let Err(e) = self.backend.delete_note(note_id).await {
                self.fail("delete_recording", e).await;
                return false;
            }
            info!(%note_id, "Note deleted");
        } else {
            debug!(%note_id, "Dropping local-only note");
        }

        let cursor = {
            let mut state = self.state.write().await;
            state.notes.retain(|n| n.id != note_id);
            state.navigation.current_folder_id()
        };
        if remote {
            self.refresh_notes(cursor).await;
        }
        self.done().await;
        true
    }

    /// Merge a note into the listing: replace by id, else append.
    pub async fn upsert_recording(&self, note: Note) {
        let mut state = self.state.write().await;
        match state.notes.iter_mut().find(|n| n.id == note.id) {
            Some(existing) => *existing = note,
            None => state.notes.push(note),
        }
    }

    /// Upload audio for transcription and summarization.
    ///
    /// Without a destination the note goes to the active folder. The
    /// returned note is merged into the listing when it lands there.
    pub async fn record(&self, upload: AudioUpload) -> Option<Note> {
        self.begin().await;
        let cursor = self.current_folder_id().await;
        let upload = match upload.folder_id {
            Some(_) => upload,
            None => upload.in_folder(cursor),
        };

        match self.backend.process_audio(&upload).await {
            Ok(note) => {
                info!(note_id = %note.id, title = %note.title, "Recording processed");
                if self.current_folder_id().await == note.folder_id {
                    self.upsert_recording(note.clone()).await;
                }
                self.done().await;
                Some(note)
            }
            Err(e) => {
                self.fail("record", e).await;
                None
            }
        }
    }

    /// Ask a question about the notes of a folder.
    pub async fn query_folder(&self, folder_id: FolderId, question: &str) -> Option<String> {
        let question = question.trim();
        if question.is_empty() {
            self.reject("Question must not be empty").await;
            return None;
        }

        self.begin().await;
        match self.backend.query_folder(folder_id, question).await {
            Ok(answer) => {
                self.done().await;
                Some(answer)
            }
            Err(e) => {
                self.fail("query_folder", e).await;
                None
            }
        }
    }

    /// Follow the session: clear on sign-out, load on sign-in.
    pub async fn on_auth_status(&self, status: AuthStatus) {
        match status {
            AuthStatus::Anonymous => self.reset().await,
            AuthStatus::Authenticated => self.refresh().await,
            AuthStatus::Loading => {}
        }
    }

    /// Return to root with empty listings and drop the note snapshots.
    pub async fn reset(&self) {
        *self.state.write().await = LibrarySnapshot::default();
        match self.store.delete_prefix(&keys::recordings_prefix()).await {
            Ok(removed) => debug!(removed, "Library reset"),
            Err(e) => warn!(error = %e, "Failed to drop note snapshots"),
        }
    }

    async fn go(&self, step: NavigationStep) {
        debug!(step = ?step, "Navigating");
        let cursor = self.state.write().await.navigation.apply(step);
        self.load(cursor).await;
    }

    async fn load(&self, folder_id: Option<FolderId>) {
        self.begin().await;
        tokio::join!(
            self.refresh_folders(folder_id),
            self.refresh_notes(folder_id)
        );
        self.done().await;
    }

    async fn refresh_folders(&self, folder_id: Option<FolderId>) {
        match self.backend.list_folders(folder_id).await {
            Ok(folders) => {
                let mut state = self.state.write().await;
                if state.navigation.is_current(folder_id) {
                    state.folders = folders;
                } else {
                    debug!(folder_id = ?folder_id, "Discarding stale folder listing");
                }
            }
            Err(e) => self.fail("list_folders", e).await,
        }
    }

    async fn refresh_notes(&self, folder_id: Option<FolderId>) {
        let page = PageRequest::first(self.page_size);
        let key = keys::recordings(folder_id);

        let (notes, source) = match self.backend.list_notes(page, folder_id).await {
            Ok(notes) => {
                if let Err(e) = self.store.set_json(&key, &notes).await {
                    warn!(error = %e, "Failed to snapshot note listing");
                }
                (notes, NoteSource::Remote)
            }
            Err(e) if e.is_authentication() => {
                self.fail("list_notes", e).await;
                return;
            }
            Err(e) => {
                warn!(error = %e, folder_id = ?folder_id, "Note listing unavailable; using local snapshot");
                let cached = self
                    .store
                    .get_json::<Vec<Note>>(&key)
                    .await
                    .unwrap_or_else(|e| {
                        warn!(error = %e, "Unreadable note snapshot");
                        None
                    })
                    .unwrap_or_default();
                (cached, NoteSource::LocalCache)
            }
        };

        let mut state = self.state.write().await;
        if state.navigation.is_current(folder_id) {
            state.notes = notes;
            state.note_source = source;
        } else {
            debug!(folder_id = ?folder_id, "Discarding stale note listing");
        }
    }

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }

    async fn done(&self) {
        self.state.write().await.loading = false;
    }

    async fn reject(&self, message: &str) {
        let mut state = self.state.write().await;
        state.loading = false;
        state.error = Some(message.to_string());
    }

    async fn fail(&self, operation: &'static str, err: AppError) {
        if err.is_authentication() {
            warn!(operation, "Session rejected; clearing library");
            self.reset().await;
        } else {
            warn!(operation, error = %err, "Library operation failed");
        }
        let mut state = self.state.write().await;
        state.loading = false;
        state.error = Some(err.message);
    }
}
