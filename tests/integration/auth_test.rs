//! Integration tests for the session lifecycle.

mod helpers;

use std::sync::Arc;

use notesgpt_cache::StoreManager;
use notesgpt_client::NotesBackend;
use notesgpt_service::auth::service::LOGIN_FAILED_MESSAGE;
use notesgpt_service::{AppSession, AuthStatus};

use helpers::{ACTIVATION_TOKEN, PASSWORD, StubBackend, TAKEN_EMAIL, TOKEN};

async fn started(stub: &StubBackend) -> AppSession {
    let mut session =
        AppSession::with_backend(Arc::new(stub.client()), StoreManager::in_memory(), 50);
    session.start().await;
    session
}

#[tokio::test]
async fn test_login_and_logout() {
    let stub = StubBackend::start().await;
    let session = started(&stub).await;
    let auth = session.auth();
    assert_eq!(auth.status(), AuthStatus::Anonymous);

    assert!(auth.login("ada@example.com", PASSWORD).await);
    let snapshot = auth.snapshot().await;
    assert_eq!(snapshot.status, AuthStatus::Authenticated);
    assert_eq!(snapshot.user.unwrap().name, "Ada Lovelace");
    assert_eq!(
        session.backend().stored_token().await.unwrap().as_deref(),
        Some(TOKEN)
    );

    assert!(auth.logout().await);
    assert_eq!(auth.status(), AuthStatus::Anonymous);
    assert!(session.backend().stored_token().await.unwrap().is_none());
}

#[tokio::test]
async fn test_wrong_password_shows_login_message() {
    let stub = StubBackend::start().await;
    let session = started(&stub).await;

    assert!(!session.auth().login("ada@example.com", "nope").await);
    let snapshot = session.auth().snapshot().await;
    assert_eq!(snapshot.status, AuthStatus::Anonymous);
    assert_eq!(snapshot.error.as_deref(), Some(LOGIN_FAILED_MESSAGE));
}

#[tokio::test]
async fn test_register_then_activate() {
    let stub = StubBackend::start().await;
    let session = started(&stub).await;
    let auth = session.auth();

    assert!(auth.register("Ada", "ada@example.com", PASSWORD).await);
    assert_eq!(auth.status(), AuthStatus::Anonymous);

    assert!(!auth.register("Ada", TAKEN_EMAIL, PASSWORD).await);
    assert_eq!(
        auth.snapshot().await.error.as_deref(),
        Some("email: a user with this email address already exists")
    );

    assert!(!auth.activate("wrong").await);
    assert!(auth.activate(ACTIVATION_TOKEN).await);
    assert!(auth.snapshot().await.error.is_none());
    assert_eq!(auth.status(), AuthStatus::Anonymous);
}

#[tokio::test]
async fn test_expired_session_signs_out() {
    let stub = StubBackend::start().await;
    let session = started(&stub).await;
    assert!(session.auth().login("ada@example.com", PASSWORD).await);
    helpers::settle().await;

    stub.expire_sessions();
    session.library().refresh().await;
    helpers::settle().await;

    assert_eq!(session.auth().status(), AuthStatus::Anonymous);
    let library = session.library().snapshot().await;
    assert!(library.folders.is_empty());
    assert!(library.notes.is_empty());
    assert!(session.backend().stored_token().await.unwrap().is_none());
}

#[tokio::test]
async fn test_token_survives_restart_with_file_store() {
    let stub = StubBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = stub.app_config(&dir.path().join("store.json"));

    {
        let mut session = AppSession::new(&config).await.unwrap();
        session.start().await;
        assert!(session.auth().login("ada@example.com", PASSWORD).await);
    }

    let mut session = AppSession::new(&config).await.unwrap();
    session.start().await;
    let snapshot = session.auth().snapshot().await;
    assert_eq!(snapshot.status, AuthStatus::Authenticated);
    assert!(snapshot.user.is_none());

    assert!(session.auth().logout().await);
    drop(session);

    let mut session = AppSession::new(&config).await.unwrap();
    session.start().await;
    assert_eq!(session.auth().status(), AuthStatus::Anonymous);
}
