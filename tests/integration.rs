use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use workout_core::auth::rules::PASSWORD_MESSAGE;
use workout_core::{
    AuthError, CredentialStore, Exercise, FetchSlot, FetchState, FileStore, ResourceFetcher,
    SessionError, SessionManager, SessionState, UserRecord,
};

// Helper to build a session manager over an on-disk store
fn file_session(dir: &std::path::Path) -> SessionManager {
    let backend = FileStore::open(dir).unwrap();
    SessionManager::restore(CredentialStore::new(Arc::new(backend)))
}

fn alice() -> UserRecord {
    UserRecord::new("alice_1", "a@b.com", "Abcdefg1")
}

// Helper to serve one HTTP response and return the URL
async fn serve_once(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buffer = [0u8; 4096];
        let _ = stream.read(&mut buffer).await;
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        let _ = stream.shutdown().await;
    });
    format!("http://{}/api/v1/exercises", addr)
}

#[test]
fn test_register_then_current_user() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = file_session(dir.path());

    session.register(alice(), "Abcdefg1").unwrap();
    assert_eq!(
        session.state(),
        &SessionState::Authenticated {
            username: "alice_1".into()
        }
    );
    assert_eq!(session.current_user().unwrap(), Some(alice()));
}

#[test]
fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    file_session(dir.path()).register(alice(), "Abcdefg1").unwrap();

    let mut restarted = file_session(dir.path());
    assert!(restarted.state().is_authenticated());
    assert!(restarted.is_authenticated());
    assert_eq!(restarted.current_user().unwrap(), Some(alice()));
}

#[test]
fn test_short_password_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = file_session(dir.path());

    let err = session
        .register(UserRecord::new("alice_1", "a@b.com", "short"), "short")
        .unwrap_err();
    assert!(
        err.validation_errors()
            .iter()
            .any(|e| e.message == PASSWORD_MESSAGE)
    );
    assert!(!FileStore::open(dir.path()).unwrap().path().exists());
    assert!(!session.is_authenticated());
}

#[test]
fn test_wrong_password_then_correct_login() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = file_session(dir.path());
    session.register(alice(), "Abcdefg1").unwrap();

    let err = session.login("alice_1", "Abcdefg2").unwrap_err();
    assert!(matches!(err, SessionError::Auth(AuthError::InvalidCredentials)));
    assert_eq!(session.current_user().unwrap(), Some(alice()));

    let result = session.login("alice_1", "Abcdefg1").unwrap();
    assert_eq!(result.username, "alice_1");
}

#[test]
fn test_logout_clears_everything() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = file_session(dir.path());
    session.register(alice(), "Abcdefg1").unwrap();

    session.logout().unwrap();
    assert_eq!(session.current_user().unwrap(), None);
    assert!(!session.is_authenticated());

    let restarted = file_session(dir.path());
    assert_eq!(restarted.state(), &SessionState::Anonymous);

    let mut restarted = restarted;
    let err = restarted.login("alice_1", "Abcdefg1").unwrap_err();
    assert!(matches!(err, SessionError::Auth(AuthError::NoAccountFound)));
}

#[test]
fn test_corrupted_store_file_recovers_through_logout_and_register() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = FileStore::open(dir.path()).unwrap().path().to_path_buf();
    std::fs::write(&store_path, b"{truncated").unwrap();

    let mut session = file_session(dir.path());
    assert_eq!(session.state(), &SessionState::Anonymous);
    assert!(!session.is_authenticated());

    session.logout().unwrap();
    session.register(alice(), "Abcdefg1").unwrap();
    assert_eq!(session.current_user().unwrap(), Some(alice()));

    let mut restarted = file_session(dir.path());
    assert_eq!(restarted.current_user().unwrap(), Some(alice()));
}

#[tokio::test]
async fn test_slot_loads_exercises() {
    let url = serve_once(
        r#"{"success":true,"data":{"exercises":[{"exerciseId":"a1","name":"face pull"},{"exerciseId":"a2","name":"row"}],"nextPage":null}}"#,
    )
    .await;

    let slot = FetchSlot::<Exercise>::new(ResourceFetcher::new().unwrap());
    let mut rx = slot.subscribe();
    assert!(slot.load(&url).await);

    let names: Vec<String> = slot.current().items().iter().map(|e| e.name.clone()).collect();
    assert_eq!(names, vec!["face pull", "row"]);
    assert!(!rx.borrow_and_update().is_loading());
}

#[tokio::test]
async fn test_slot_reports_flag_error() {
    let url = serve_once(r#"{"success":false}"#).await;

    let slot = FetchSlot::<Exercise>::new(ResourceFetcher::new().unwrap());
    slot.load(&url).await;
    assert_eq!(
        slot.current(),
        FetchState::Error("API success flag is false".into())
    );
}

#[tokio::test]
async fn test_newer_load_wins_over_stale_completion() {
    let stale_url = serve_once(
        r#"{"success":true,"data":{"exercises":[{"exerciseId":"old","name":"old"}]}}"#,
    )
    .await;
    let fresh_url = serve_once(r#"{"success":true,"data":{"exercises":[]}}"#).await;

    let fetcher = ResourceFetcher::new().unwrap();
    let slot = FetchSlot::<Exercise>::new(fetcher.clone());

    let stale = slot.begin(&stale_url);
    assert!(slot.load(&fresh_url).await);

    let late = fetcher.fetch::<Exercise>(&stale_url).await;
    assert!(!slot.complete(&stale, late));
    assert_eq!(slot.current(), FetchState::Success(Vec::new()));
}
