//! Login, registration, activation and logout.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, broadcast, watch};
use tracing::{debug, info, warn};

use notesgpt_client::NotesBackend;
use notesgpt_core::error::AppError;
use notesgpt_core::events::SessionEvent;
use notesgpt_core::result::AppResult;
use notesgpt_entity::session::{Session, SocialCredential};
use notesgpt_entity::user::RegisterUser;

use super::state::{AuthSnapshot, AuthStatus};

/// Message shown when the backend rejects a login attempt.
pub const LOGIN_FAILED_MESSAGE: &str =
    "Authentication failed. Please check credentials or log in again.";

/// Owns the session state machine.
///
/// Operations never return errors; failures land in
/// [`AuthSnapshot::error`] and the boolean result.
#[derive(Debug)]
pub struct AuthService {
    /// Backend the session lives on.
    backend: Arc<dyn NotesBackend>,
    /// Current state.
    state: RwLock<AuthSnapshot>,
    /// Status publisher.
    status: watch::Sender<AuthStatus>,
    /// Session events not yet applied by [`AuthService::sync_session_events`].
    events: Mutex<broadcast::Receiver<SessionEvent>>,
}

impl AuthService {
    /// Creates a new auth service in the `Loading` state.
    pub fn new(backend: Arc<dyn NotesBackend>) -> Self {
        let events = Mutex::new(backend.subscribe());
        let (status, _) = watch::channel(AuthStatus::Loading);
        Self {
            backend,
            state: RwLock::new(AuthSnapshot::default()),
            status,
            events,
        }
    }

    /// Subscribe to status transitions.
    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }

    /// Current status.
    pub fn status(&self) -> AuthStatus {
        *self.status.borrow()
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> AuthSnapshot {
        self.state.read().await.clone()
    }

    /// Resolve the initial state from the stored token.
    pub async fn initialize(&self) -> AuthStatus {
        self.begin().await;

        let status = match self.backend.stored_token().await {
            Ok(Some(token)) => {
                let session = Session::restored(token);
                let mut state = self.state.write().await;
                state.status = AuthStatus::Authenticated;
                state.user = session.user;
                state.loading = false;
                AuthStatus::Authenticated
            }
            Ok(None) => {
                self.state.write().await.sign_out();
                AuthStatus::Anonymous
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                let mut state = self.state.write().await;
                state.sign_out();
                state.error = Some(e.message);
                AuthStatus::Anonymous
            }
        };

        info!(%status, "Auth state initialized");
        self.publish(status);
        status
    }

    /// Log in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.begin().await;
        let result = self.backend.login(email, password).await;
        self.finish_login(result).await
    }

    /// Log in with a platform sign-in credential.
    pub async fn social_login(&self, credential: &SocialCredential) -> bool {
        self.begin().await;
        let result = self.backend.social_login(credential).await;
        self.finish_login(result).await
    }

    async fn finish_login(&self, result: AppResult<Session>) -> bool {
        match result {
            Ok(session) => {
                {
                    let mut state = self.state.write().await;
                    state.status = AuthStatus::Authenticated;
                    state.user = session.user;
                    state.error = None;
                    state.loading = false;
                }
                info!("Logged in");
                self.publish(AuthStatus::Authenticated);
                true
            }
            Err(e) if e.is_authentication() => {
                warn!("Login rejected by the backend");
                {
                    let mut state = self.state.write().await;
                    state.sign_out();
                    state.error = Some(LOGIN_FAILED_MESSAGE.to_string());
                }
                self.publish(AuthStatus::Anonymous);
                false
            }
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.fail(e).await;
                false
            }
        }
    }

    /// Create an account. Does not establish a session.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> bool {
        self.begin().await;
        let user = RegisterUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.backend.register(&user).await {
            Ok(user) => {
                info!(user_id = %user.id, "Account registered");
                self.state.write().await.loading = false;
                true
            }
            Err(e) => {
                warn!(error = %e, "Registration failed");
                self.fail(e).await;
                false
            }
        }
    }

    /// Activate an account with the emailed token.
    pub async fn activate(&self, token: &str) -> bool {
        self.begin().await;
        match self.backend.activate(token).await {
            Ok(user) => {
                info!(user_id = %user.id, "Account activated");
                self.state.write().await.loading = false;
                true
            }
            Err(e) => {
                warn!(error = %e, "Activation failed");
                self.fail(e).await;
                false
            }
        }
    }

    /// End the session.
    ///
    /// The in-memory session is dropped regardless; `false` means the stored
    /// token could not be removed.
    pub async fn logout(&self) -> bool {
        let cleared = self.backend.logout().await;
        {
            let mut state = self.state.write().await;
            state.sign_out();
            state.error = cleared.as_ref().err().map(|e| e.message.clone());
        }
        self.publish(AuthStatus::Anonymous);
        match cleared {
            Ok(()) => {
                info!("Logged out");
                true
            }
            Err(e) => {
                warn!(error = %e, "Logged out, but the stored token could not be removed");
                false
            }
        }
    }

    /// Apply one session event from the API client.
    pub async fn handle_session_event(&self, event: SessionEvent) {
        match event {
            SessionEvent::Established => {}
            SessionEvent::AuthenticationRequired { path } => {
                if !self.status().is_authenticated() {
                    return;
                }
                // A login that finished after the 401 stored a fresh token.
                if matches!(self.backend.stored_token().await, Ok(Some(_))) {
                    debug!(path = %path, "Ignoring 401 from before the current session");
                    return;
                }
                warn!(path = %path, "Session rejected by the backend");
                self.state.write().await.sign_out();
                self.publish(AuthStatus::Anonymous);
            }
            SessionEvent::LoggedOut => {
                if self.status().is_authenticated() {
                    self.state.write().await.sign_out();
                    self.publish(AuthStatus::Anonymous);
                }
            }
        }
    }

    /// Apply every session event received since the last call.
    pub async fn sync_session_events(&self) {
        let mut pending = Vec::new();
        {
            let mut events = self.events.lock().await;
            loop {
                match events.try_recv() {
                    Ok(event) => pending.push(event),
                    Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                        warn!(skipped, "Session events dropped");
                    }
                    Err(_) => break,
                }
            }
        }
        for event in pending {
            self.handle_session_event(event).await;
        }
    }

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }

    async fn fail(&self, err: AppError) {
        let mut state = self.state.write().await;
        state.loading = false;
        state.error = Some(err.message);
    }

    fn publish(&self, status: AuthStatus) {
        self.status.send_if_modified(|current| {
            if *current == status {
                return false;
            }
            *current = status;
            true
        });
    }
}
