//! Integration tests for the REST client against the stub backend.

mod helpers;

use reqwest::Method;

use notesgpt_client::{AudioUpload, RequestBody};
use notesgpt_core::error::ErrorKind;
use notesgpt_core::events::SessionEvent;
use notesgpt_core::types::{FolderId, NoteId, PageRequest};
use notesgpt_entity::folder::{CreateFolder, UpdateFolder};
use notesgpt_entity::note::CreateNote;
use notesgpt_entity::user::RegisterUser;

use helpers::{PASSWORD, StubBackend, TAKEN_EMAIL, TOKEN};

#[tokio::test]
async fn test_login_stores_token_and_sends_bearer() {
    let stub = StubBackend::start().await;
    let api = stub.client();

    let session = api.login("ada@example.com", PASSWORD).await.unwrap();
    assert_eq!(session.token, TOKEN);
    assert_eq!(session.user.unwrap().email, "ada@example.com");
    assert_eq!(api.stored_token().await.unwrap().as_deref(), Some(TOKEN));

    api.list_folders(None).await.unwrap();
    let listed = stub.requests_to("GET", "/v1/folders");
    assert_eq!(listed.len(), 1);
    assert_eq!(
        listed[0].authorization.as_deref(),
        Some(format!("Bearer {TOKEN}").as_str())
    );
}

#[tokio::test]
async fn test_anonymous_requests_carry_no_authorization() {
    let stub = StubBackend::start().await;
    let api = stub.client();

    let body = api
        .request(Method::GET, "/v1/healthcheck", &[], RequestBody::Empty)
        .await
        .unwrap();
    assert_eq!(body["status"], "available");
    assert!(stub.requests()[0].authorization.is_none());
}

#[tokio::test]
async fn test_wrong_password_is_authentication_error() {
    let stub = StubBackend::start().await;
    let api = stub.client();

    let err = api.login("ada@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.status, Some(401));
    assert!(api.stored_token().await.unwrap().is_none());
}

#[tokio::test]
async fn test_unauthorized_clears_token_and_publishes() {
    let stub = StubBackend::start().await;
    let api = stub.client();
    api.login("ada@example.com", PASSWORD).await.unwrap();
    let mut events = api.subscribe();

    stub.expire_sessions();
    let err = api.list_folders(Some(FolderId(5))).await.unwrap_err();
    assert!(err.is_authentication());
    assert!(api.stored_token().await.unwrap().is_none());
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::AuthenticationRequired {
            path: "/v1/folders".to_string()
        }
    );

    // The next call goes out without a token.
    let _ = api.list_notes(PageRequest::default(), None).await;
    let last = stub.requests().pop().unwrap();
    assert!(last.authorization.is_none());
}

#[tokio::test]
async fn test_validation_errors_are_flattened() {
    let stub = StubBackend::start().await;
    let api = stub.client();

    let user = RegisterUser {
        name: "Ada".to_string(),
        email: TAKEN_EMAIL.to_string(),
        password: PASSWORD.to_string(),
    };
    let err = api.register(&user).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::RequestFailed);
    assert_eq!(err.status, Some(422));
    assert_eq!(
        err.message,
        "email: a user with this email address already exists"
    );
}

#[tokio::test]
async fn test_server_message_and_status_text() {
    let stub = StubBackend::start().await;
    let api = stub.client();
    api.login("ada@example.com", PASSWORD).await.unwrap();

    let err = api.get_note(NoteId(999)).await.unwrap_err();
    assert_eq!(err.status, Some(404));
    assert_eq!(err.message, "the requested resource could not be found");

    let err = api
        .request(Method::GET, "/v1/boom", &[], RequestBody::Empty)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::RequestFailed);
    assert_eq!(err.message, "Internal Server Error");
}

#[tokio::test]
async fn test_unreachable_backend() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = notesgpt_core::config::ApiConfig {
        base_url: format!("http://{addr}"),
        request_timeout_seconds: 2,
        ..Default::default()
    };
    let api = notesgpt_client::ApiClient::new(&config, notesgpt_cache::StoreManager::in_memory())
        .unwrap();
    let err = api.list_folders(None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NetworkUnavailable);
}

#[tokio::test]
async fn test_list_notes_query_and_null_list() {
    let stub = StubBackend::start().await;
    let api = stub.client();
    api.login("ada@example.com", PASSWORD).await.unwrap();

    let notes = api
        .list_notes(PageRequest::new(2, 10), Some(FolderId(6)))
        .await
        .unwrap();
    assert!(notes.is_empty());
    let request = stub.requests_to("GET", "/v1/notes").pop().unwrap();
    assert_eq!(request.uri, "/v1/notes?page=2&page_size=10&folder_id=6");
}

#[tokio::test]
async fn test_notes_decode_nullable_text() {
    let stub = StubBackend::start().await;
    let api = stub.client();
    api.login("ada@example.com", PASSWORD).await.unwrap();

    let notes = api.list_notes(PageRequest::first(50), Some(FolderId(5))).await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].transcript.as_deref(), Some("We shipped the release"));
    assert!(notes[0].from_backend);

    let groceries = api.get_note(NoteId(3)).await.unwrap();
    assert!(groceries.transcript.is_none());
    assert!(groceries.summary.is_none());
    assert!(groceries.folder_id.is_none());
}

#[tokio::test]
async fn test_note_lifecycle() {
    let stub = StubBackend::start().await;
    let api = stub.client();
    api.login("ada@example.com", PASSWORD).await.unwrap();

    let created = api
        .create_note(&CreateNote {
            title: "Idea".to_string(),
            content: "Write things down".to_string(),
        })
        .await
        .unwrap();
    assert!(created.from_backend);

    let moved = api.move_note(created.id, Some(FolderId(6))).await.unwrap();
    assert_eq!(moved.folder_id, Some(FolderId(6)));
    let moved = api.move_note(created.id, None).await.unwrap();
    assert_eq!(moved.folder_id, None);

    api.delete_note(created.id).await.unwrap();
    let err = api.get_note(created.id).await.unwrap_err();
    assert_eq!(err.status, Some(404));
}

#[tokio::test]
async fn test_folder_lifecycle() {
    let stub = StubBackend::start().await;
    let api = stub.client();
    api.login("ada@example.com", PASSWORD).await.unwrap();

    let created = api
        .create_folder(&CreateFolder {
            name: "Ideas".to_string(),
            parent_id: Some(FolderId(5)),
        })
        .await
        .unwrap();
    assert_eq!(created.parent_id, Some(FolderId(5)));

    let children = api.list_folders(Some(FolderId(5))).await.unwrap();
    let names: Vec<_> = children.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Reports", "Ideas"]);

    let renamed = api
        .update_folder(
            created.id,
            &UpdateFolder {
                name: Some("Brainstorm".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Brainstorm");
    assert_eq!(api.get_folder(created.id).await.unwrap().name, "Brainstorm");

    // 204 with an empty body.
    api.delete_folder(created.id).await.unwrap();
    assert!(!stub.folder_names().contains(&"Brainstorm".to_string()));

    let answer = api.query_folder(FolderId(5), "what shipped?").await.unwrap();
    assert_eq!(answer, "1 note(s) answer 'what shipped?'");
}

#[tokio::test]
async fn test_process_audio_sends_multipart() {
    let stub = StubBackend::start().await;
    let api = stub.client();
    api.login("ada@example.com", PASSWORD).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meeting.mp3");
    std::fs::write(&path, b"ID3fake-audio").unwrap();

    let upload = AudioUpload::new(&path)
        .with_title("Meeting")
        .in_folder(Some(FolderId(5)));
    let note = api.process_audio(&upload).await.unwrap();
    assert_eq!(note.title, "Meeting");
    assert_eq!(note.folder_id, Some(FolderId(5)));
    assert!(note.from_backend);

    let uploads = stub.uploads();
    assert_eq!(uploads.len(), 1);
    let sent = &uploads[0];
    assert_eq!(sent.file_name.as_deref(), Some("meeting.mp3"));
    assert_eq!(sent.content_type.as_deref(), Some("audio/mp3"));
    assert_eq!(sent.audio_len, 13);
    assert_eq!(sent.fields["title"], "Meeting");
    assert_eq!(sent.fields["language"], "english");
    assert_eq!(sent.fields["folder_id"], "5");
    assert!(!sent.fields.contains_key("prompt"));
}

#[tokio::test]
async fn test_process_audio_rejects_missing_file() {
    let stub = StubBackend::start().await;
    let api = stub.client();
    api.login("ada@example.com", PASSWORD).await.unwrap();

    let err = api
        .process_audio(&AudioUpload::new("/definitely/not/here.mp3"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(stub.requests_to("POST", "/v1/process").is_empty());
}
