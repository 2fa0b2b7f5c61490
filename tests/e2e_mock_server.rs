//! E2E tests using the mock FAIRDOM-SEEK server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use seekapi::mock_server::{Fixtures, MockServer, MockState, DEFAULT_TOKEN};
use seekapi::{ClientConfig, CreateFallback, Members, SeekClient, SeekError, StaticCredentials};
use serde_json::json;

async fn logged_in(server: &MockServer) -> SeekClient {
    let mut client = SeekClient::new(server.url(), true).unwrap();
    client
        .login(Some(DEFAULT_TOKEN))
        .await
        .expect("Failed to log in");
    client
}

fn title(value: &str) -> Members {
    let mut m = Members::new();
    m.insert("title".to_string(), json!(value));
    m
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start_empty().await;
    let url = server.url().to_string();

    server.shutdown().await;

    let result = reqwest::Client::new()
        .get(format!("{}/studies", url))
        .send()
        .await;

    assert!(result.is_err());
}

// =============================================================================
// Session Tests
// =============================================================================

#[tokio::test]
async fn test_login_with_wrong_token_fails() {
    let server = MockServer::start().await;
    let mut client = SeekClient::new(server.url(), true).unwrap();

    let err = client.login(Some("wrong-token")).await.unwrap_err();

    assert_eq!(err.status_code(), Some(401));
    assert!(err.to_string().contains("Unauthorized"));
    assert!(!client.is_logged_in());

    server.shutdown().await;
}

#[tokio::test]
async fn test_basic_auth_login() {
    // "alice:secret"
    let state = MockState::new()
        .with_current_user(Fixtures::person("4", "Alice", "Smith"))
        .with_required_basic_auth("Basic YWxpY2U6c2VjcmV0");
    let server = MockServer::with_state(state).await;

    let mut client = SeekClient::new(server.url(), true)
        .unwrap()
        .with_credential_provider(StaticCredentials::new("alice", "secret"));
    client.login(None).await.expect("Failed to log in");

    assert_eq!(
        client.current_user().and_then(|u| u.title()),
        Some("Alice Smith")
    );
    assert!(client.list("studies").await.unwrap().is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_token_login_without_identity() {
    let server = MockServer::with_state(MockState::new().with_required_token("t")).await;
    let mut client = SeekClient::new(server.url(), true).unwrap();

    client.login(Some("t")).await.expect("404 identity should be accepted");

    assert!(client.current_user().is_none());
    assert!(client.list("assays").await.is_ok());

    server.shutdown().await;
}

// =============================================================================
// Resource Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_list_and_fetch_workflow() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    let assays = client.list("assays").await.expect("Failed to list assays");
    assert_eq!(assays.len(), 2);

    let first = &assays[0];
    let assay = client
        .fetch("assays", &first.id)
        .await
        .expect("Failed to fetch assay");

    assert_eq!(assay, *first);
    assert!(assay.relationship("study").is_some());

    server.shutdown().await;
}

#[tokio::test]
async fn test_create_update_delete_workflow() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    let mut relationships = Members::new();
    relationships.insert(
        "investigation".to_string(),
        json!({"data": {"type": "investigations", "id": "1"}}),
    );

    // Step 1: Create
    let created = client
        .create("studies", title("Draft Study"), relationships)
        .await
        .expect("Failed to create study");
    assert_eq!(created.title(), Some("Draft Study"));

    // Step 2: Update
    let updated = client
        .update("studies", &created.id, title("Final Study"), Members::new())
        .await
        .expect("Failed to update study");
    assert_eq!(updated.title(), Some("Final Study"));
    assert!(updated.relationship("investigation").is_some());

    // Step 3: Verify update persisted
    let fetched = client.fetch("studies", &created.id).await.unwrap();
    assert_eq!(fetched.title(), Some("Final Study"));

    // Step 4: Delete
    client
        .delete("studies", &created.id)
        .await
        .expect("Failed to delete study");

    let err = client.fetch("studies", &created.id).await.unwrap_err();
    assert!(err.is_not_found());

    server.shutdown().await;
}

#[tokio::test]
async fn test_delete_missing_resource() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    let err = client.delete("assays", "404").await.unwrap_err();

    match err {
        SeekError::ApiError { status_code, message, .. } => {
            assert_eq!(status_code, 404);
            assert!(message.contains("Not found"));
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_fetch_or_create_workflow() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    // Existing study is fetched
    let outcome = client
        .fetch_or_create("studies", "1", title("Ignored"), Members::new())
        .await
        .unwrap();
    assert!(!outcome.was_created());
    assert_eq!(outcome.resource().title(), Some("Test Study"));

    // Missing study is created
    let outcome = client
        .fetch_or_create("studies", "77", title("Brand New"), Members::new())
        .await
        .unwrap();
    assert!(outcome.was_created());
    let created_id = outcome.resource().id.clone();

    let requests = server.requests().await;
    let tail: Vec<&str> = requests.iter().rev().take(2).rev().map(String::as_str).collect();
    assert_eq!(tail, vec!["GET /studies/77", "POST /studies"]);

    // The new study is now listed
    let studies = client.list("studies").await.unwrap();
    assert!(studies.iter().any(|s| s.id == created_id));

    server.shutdown().await;
}

#[tokio::test]
async fn test_fetch_or_create_not_found_only_with_unauthorized_fetch() {
    let server = MockServer::start().await;
    let mut client = SeekClient::with_config(
        ClientConfig::new(server.url()).with_fallback(CreateFallback::NotFoundOnly),
    )
    .unwrap();
    client.login(Some(DEFAULT_TOKEN)).await.unwrap();

    // Revoke the token server-side so the fetch fails with 401
    server.state().write().await.required_token = Some("rotated".to_string());

    let err = client
        .fetch_or_create("studies", "1", title("X"), Members::new())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(401));

    let requests = server.requests().await;
    assert!(!requests.iter().any(|r| r == "POST /studies"));

    server.shutdown().await;
}
