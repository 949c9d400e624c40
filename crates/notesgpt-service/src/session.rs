//! Process-wide session wiring.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use notesgpt_cache::StoreManager;
use notesgpt_client::{ApiClient, NotesBackend};
use notesgpt_core::config::AppConfig;
use notesgpt_core::result::AppResult;

use crate::auth::AuthService;
use crate::library::LibraryService;

/// Owns the backend and both state services for the lifetime of the
/// process.
///
/// Built once at startup; [`AppSession::start`] wires session events into
/// the auth state and auth status into the library state.
#[derive(Debug)]
pub struct AppSession {
    /// Backend shared by both services.
    backend: Arc<dyn NotesBackend>,
    /// Session state machine.
    auth: Arc<AuthService>,
    /// Navigation and listings.
    library: Arc<LibraryService>,
    /// Background watchers spawned by `start`.
    watchers: Vec<JoinHandle<()>>,
}

impl AppSession {
    /// Build the session from configuration.
    pub async fn new(config: &AppConfig) -> AppResult<Self> {
        let store = StoreManager::new(&config.store).await?;
        let api = ApiClient::new(&config.api, store.clone())?;
        Ok(Self::with_backend(
            Arc::new(api),
            store,
            config.api.notes_page_size,
        ))
    }

    /// Build the session over an existing backend.
    pub fn with_backend(backend: Arc<dyn NotesBackend>, store: StoreManager, page_size: u64) -> Self {
        let auth = Arc::new(AuthService::new(backend.clone()));
        let library = Arc::new(LibraryService::new(backend.clone(), store, page_size));
        Self {
            backend,
            auth,
            library,
            watchers: Vec::new(),
        }
    }

    /// The backend both services talk to.
    pub fn backend(&self) -> &Arc<dyn NotesBackend> {
        &self.backend
    }

    /// The auth state.
    pub fn auth(&self) -> &Arc<AuthService> {
        &self.auth
    }

    /// The library state.
    pub fn library(&self) -> &Arc<LibraryService> {
        &self.library
    }

    /// Resolve the initial auth state and spawn the watchers.
    ///
    /// The library is not loaded here; it follows later status changes.
    /// Calling `start` twice is a no-op.
    pub async fn start(&mut self) {
        if !self.watchers.is_empty() {
            return;
        }

        let status = self.auth.initialize().await;

        let mut events = self.backend.subscribe();
        let auth = self.auth.clone();
        self.watchers.push(tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        debug!(event = ?event, "Session event");
                        auth.handle_session_event(event).await;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Session watcher lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }));

        let mut statuses = self.auth.subscribe();
        let library = self.library.clone();
        self.watchers.push(tokio::spawn(async move {
            while statuses.changed().await.is_ok() {
                let status = *statuses.borrow_and_update();
                library.on_auth_status(status).await;
            }
        }));

        info!(%status, "Session started");
    }

    /// Stop the watchers.
    pub fn shutdown(&mut self) {
        for watcher in self.watchers.drain(..) {
            watcher.abort();
        }
        debug!("Session stopped");
    }
}

impl Drop for AppSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}
