// Integration tests for the static file fallback

use crate::helpers::{TEST_API_KEY, app_for, body_text, send};

use std::fs;

use axum::http::StatusCode;
use wiremock::MockServer;

#[tokio::test]
async fn given_index_in_static_dir_when_requesting_root_then_served() {
    let server = MockServer::start().await;
    let static_dir = tempfile::tempdir().unwrap();
    fs::write(
        static_dir.path().join("index.html"),
        "<h1>Pool ChemGPT</h1>",
    )
    .unwrap();
    let app = app_for(&server, Some(TEST_API_KEY), static_dir.path());

    let response = send(app, "GET", "/", "").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "<h1>Pool ChemGPT</h1>");
}

/// **VALUE**: Only the static directory is exposed.
///
/// **BUG THIS CATCHES**: Would catch the server being pointed at the working
/// directory, where `.env` (and the credential) lives.
#[tokio::test]
async fn given_file_outside_static_dir_when_requested_then_not_found() {
    let server = MockServer::start().await;
    let root = tempfile::tempdir().unwrap();
    let static_dir = root.path().join("public");
    fs::create_dir_all(&static_dir).unwrap();
    fs::write(root.path().join(".env"), "OPENAI_API_KEY=sk-secret").unwrap();
    let app = app_for(&server, Some(TEST_API_KEY), &static_dir);

    let direct = send(app.clone(), "GET", "/.env", "").await;
    let traversal = send(app, "GET", "/../.env", "").await;

    assert_eq!(direct.status(), StatusCode::NOT_FOUND);
    assert_ne!(traversal.status(), StatusCode::OK);
}
