//! Test helpers for router integration tests.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; the
//! completion provider is a wiremock server.

use pool_chem::routes::router;
use pool_chem::state::AppState;

use report_core::ReportTranslator;
use report_core::config::UpstreamConfig;

use std::path::Path;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "sk-test-router-0123456789abcdef";

pub fn app_for(server: &MockServer, api_key: Option<&str>, static_dir: &Path) -> Router {
    let config = UpstreamConfig::new(api_key.map(str::to_string), None)
        .expect("valid config")
        .with_base_url(&server.uri())
        .expect("mock server URI is a valid base");
    let translator = ReportTranslator::with_http_transport(config).expect("transport builds");
    router(AppState::new(translator), static_dir)
}

pub async fn send(app: Router, method: &str, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    String::from_utf8_lossy(&bytes).into_owned()
}

pub fn completion_body(content: &str) -> Value {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
}
