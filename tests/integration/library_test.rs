//! Integration tests for folder navigation against the stub backend.

mod helpers;

use std::sync::Arc;

use notesgpt_cache::StoreManager;
use notesgpt_client::AudioUpload;
use notesgpt_core::types::{FolderId, NoteId};
use notesgpt_entity::folder::FolderCrumb;
use notesgpt_service::{AppSession, LibrarySnapshot, NoteSource};

use helpers::{PASSWORD, StubBackend};

async fn logged_in(stub: &StubBackend) -> AppSession {
    let mut session =
        AppSession::with_backend(Arc::new(stub.client()), StoreManager::in_memory(), 50);
    session.start().await;
    assert!(session.auth().login("ada@example.com", PASSWORD).await);
    helpers::settle().await;
    session
}

fn folder_names(snapshot: &LibrarySnapshot) -> Vec<&str> {
    snapshot.folders.iter().map(|f| f.name.as_str()).collect()
}

fn note_titles(snapshot: &LibrarySnapshot) -> Vec<&str> {
    snapshot.notes.iter().map(|n| n.title.as_str()).collect()
}

#[tokio::test]
async fn test_login_loads_root() {
    let stub = StubBackend::start().await;
    let session = logged_in(&stub).await;

    let snapshot = session.library().snapshot().await;
    assert!(snapshot.navigation.is_root());
    assert_eq!(folder_names(&snapshot), vec!["Work", "Home"]);
    assert_eq!(note_titles(&snapshot), vec!["Groceries"]);
}

#[tokio::test]
async fn test_work_reports_round_trip() {
    let stub = StubBackend::start().await;
    let session = logged_in(&stub).await;
    let library = session.library();

    library
        .navigate_to_folder(Some(FolderId(5)), Some("Work"))
        .await
        .unwrap();
    let snapshot = library.snapshot().await;
    assert_eq!(snapshot.navigation.current_folder_id(), Some(FolderId(5)));
    assert_eq!(folder_names(&snapshot), vec!["Reports"]);
    assert_eq!(note_titles(&snapshot), vec!["Standup"]);

    library
        .navigate_to_folder(Some(FolderId(12)), Some("Reports"))
        .await
        .unwrap();
    let snapshot = library.snapshot().await;
    assert_eq!(
        snapshot.navigation.path(),
        &[
            FolderCrumb::new(FolderId(5), "Work"),
            FolderCrumb::new(FolderId(12), "Reports")
        ]
    );
    assert_eq!(note_titles(&snapshot), vec!["Budget"]);

    library
        .navigate_to_folder(Some(FolderId(5)), Some("Work"))
        .await
        .unwrap();
    let snapshot = library.snapshot().await;
    assert_eq!(snapshot.navigation.path(), &[FolderCrumb::new(FolderId(5), "Work")]);
    assert_eq!(note_titles(&snapshot), vec!["Standup"]);

    library.navigate_to_folder(None, None).await.unwrap();
    let snapshot = library.snapshot().await;
    assert!(snapshot.navigation.path().is_empty());
    assert_eq!(folder_names(&snapshot), vec!["Work", "Home"]);
}

#[tokio::test]
async fn test_delete_active_folder_moves_up() {
    let stub = StubBackend::start().await;
    let session = logged_in(&stub).await;
    let library = session.library();

    library.navigate_to_folder(Some(FolderId(5)), None).await.unwrap();
    library.navigate_to_folder(Some(FolderId(12)), None).await.unwrap();

    assert!(library.remove_folder(FolderId(12)).await);
    let snapshot = library.snapshot().await;
    assert_eq!(snapshot.navigation.current_folder_id(), Some(FolderId(5)));
    assert!(snapshot.folders.is_empty());

    assert!(library.remove_folder(FolderId(5)).await);
    let snapshot = library.snapshot().await;
    assert!(snapshot.navigation.is_root());
    assert_eq!(folder_names(&snapshot), vec!["Home"]);
}

#[tokio::test]
async fn test_create_and_rename_folder() {
    let stub = StubBackend::start().await;
    let session = logged_in(&stub).await;
    let library = session.library();

    library.navigate_to_folder(Some(FolderId(5)), None).await.unwrap();
    let created = library.add_folder("Ideas", Some(FolderId(5))).await.unwrap();
    assert_eq!(folder_names(&library.snapshot().await), vec!["Reports", "Ideas"]);

    library.navigate_to_folder(Some(created.id), None).await.unwrap();
    assert!(library.rename_folder(created.id, "Brainstorm").await);
    let snapshot = library.snapshot().await;
    assert_eq!(snapshot.navigation.path()[1].name, "Brainstorm");
    assert!(stub.folder_names().contains(&"Brainstorm".to_string()));
}

#[tokio::test]
async fn test_unavailable_notes_fall_back_to_snapshot() {
    let stub = StubBackend::start().await;
    let session = logged_in(&stub).await;
    let library = session.library();

    library.navigate_to_folder(Some(FolderId(5)), None).await.unwrap();
    library.navigate_to_folder(None, None).await.unwrap();

    stub.set_notes_unavailable(true);
    library.navigate_to_folder(Some(FolderId(5)), None).await.unwrap();
    let snapshot = library.snapshot().await;
    assert_eq!(snapshot.note_source, NoteSource::LocalCache);
    assert_eq!(note_titles(&snapshot), vec!["Standup"]);
    assert_eq!(folder_names(&snapshot), vec!["Reports"]);

    stub.set_notes_unavailable(false);
    library.refresh().await;
    assert_eq!(library.snapshot().await.note_source, NoteSource::Remote);
}

#[tokio::test]
async fn test_move_and_delete_recordings() {
    let stub = StubBackend::start().await;
    let session = logged_in(&stub).await;
    let library = session.library();

    library.navigate_to_folder(Some(FolderId(5)), None).await.unwrap();
    assert!(library.move_recording(NoteId(1), Some(FolderId(12))).await);
    assert!(library.snapshot().await.notes.is_empty());

    library.navigate_to_folder(Some(FolderId(12)), None).await.unwrap();
    assert_eq!(
        note_titles(&library.snapshot().await),
        vec!["Standup", "Budget"]
    );

    assert!(library.delete_recording(NoteId(2)).await);
    assert_eq!(note_titles(&library.snapshot().await), vec!["Standup"]);
    assert_eq!(stub.requests_to("DELETE", "/v1/notes/2").len(), 1);
}

#[tokio::test]
async fn test_record_into_current_folder() {
    let stub = StubBackend::start().await;
    let session = logged_in(&stub).await;
    let library = session.library();
    library.navigate_to_folder(Some(FolderId(6)), None).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memo.m4a");
    std::fs::write(&path, b"audio").unwrap();

    let note = library
        .record(AudioUpload::new(&path).with_title("Memo").with_prompt("Bullet points"))
        .await
        .unwrap();
    assert_eq!(note.folder_id, Some(FolderId(6)));
    assert_eq!(note_titles(&library.snapshot().await), vec!["Memo"]);

    let sent = &stub.uploads()[0];
    assert_eq!(sent.fields["folder_id"], "6");
    assert_eq!(sent.fields["prompt"], "Bullet points");
}

#[tokio::test]
async fn test_logout_clears_library() {
    let stub = StubBackend::start().await;
    let session = logged_in(&stub).await;
    let library = session.library();
    library.navigate_to_folder(Some(FolderId(5)), None).await.unwrap();

    assert!(session.auth().logout().await);
    helpers::settle().await;

    assert_eq!(library.snapshot().await, LibrarySnapshot::default());
}
