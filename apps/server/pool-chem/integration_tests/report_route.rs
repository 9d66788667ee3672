// Integration tests for POST /api/report through the full router
// Covers every row of the outcome table as the HTTP caller sees it

use crate::helpers::{TEST_API_KEY, app_for, body_json, completion_body, send};

use pool_chem::routes::{MAX_BODY_BYTES, REPORT_ROUTE};

use std::net::TcpListener;

use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Every non-POST method gets the JSON 405 and no upstream traffic.
///
/// **BUG THIS CATCHES**: Would catch the route being registered with `post()`
/// (axum's own 405 has no JSON body) or validation running after dispatch.
#[tokio::test]
async fn given_non_post_when_requesting_report_then_405_and_no_upstream_call() {
    // GIVEN: A provider that must never be hit
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
        .expect(0)
        .mount(&server)
        .await;
    let static_dir = tempfile::tempdir().unwrap();

    for verb in ["GET", "PUT", "DELETE", "PATCH"] {
        // WHEN: Calling the report route with a non-POST verb
        let app = app_for(&server, Some(TEST_API_KEY), static_dir.path());
        let response = send(app, verb, REPORT_ROUTE, "{}").await;

        // THEN: 405 with the JSON error body
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{verb}");
        assert_eq!(body_json(response).await, json!({"error": "Method not allowed"}));
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_missing_credential_when_posting_then_500_and_no_upstream_call() {
    let server = MockServer::start().await;
    let static_dir = tempfile::tempdir().unwrap();
    let app = app_for(&server, None, static_dir.path());

    let response = send(app, "POST", REPORT_ROUTE, r#"{"ph": 7.5}"#).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Missing OPENAI_API_KEY in environment"})
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

/// **VALUE**: The happy path returns `{"report": ...}` with trimmed markdown.
#[tokio::test]
async fn given_provider_content_when_posting_then_200_with_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", format!("Bearer {TEST_API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("  Report body  ")))
        .expect(1)
        .mount(&server)
        .await;
    let static_dir = tempfile::tempdir().unwrap();
    let app = app_for(&server, Some(TEST_API_KEY), static_dir.path());

    let response = send(
        app,
        "POST",
        REPORT_ROUTE,
        r#"{"fc": 2.1, "ph": 7.6, "pool_volume": 52000}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"report": "Report body"}));
}

/// **VALUE**: An empty 2xx reply still yields a 200 with the same body shape.
///
/// **WHY THIS MATTERS**: Callers that only check "got a report" must not break
/// on a degenerate model reply.
#[tokio::test]
async fn given_provider_empty_choices_when_posting_then_200_with_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;
    let static_dir = tempfile::tempdir().unwrap();
    let app = app_for(&server, Some(TEST_API_KEY), static_dir.path());

    let response = send(app, "POST", REPORT_ROUTE, "{}").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"report": "No response generated."})
    );
}

#[tokio::test]
async fn given_provider_429_when_posting_then_429_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"error": {"message": "rate limited"}})),
        )
        .mount(&server)
        .await;
    let static_dir = tempfile::tempdir().unwrap();
    let app = app_for(&server, Some(TEST_API_KEY), static_dir.path());

    let response = send(app, "POST", REPORT_ROUTE, "{}").await;

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        body_json(response).await,
        json!({"error": "rate limited", "status": 429})
    );
}

#[tokio::test]
async fn given_provider_unreachable_when_posting_then_500() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = report_core::config::UpstreamConfig::new(Some(TEST_API_KEY.to_string()), None)
        .unwrap()
        .with_base_url(&format!("http://127.0.0.1:{port}"))
        .unwrap();
    let translator = report_core::ReportTranslator::with_http_transport(config).unwrap();
    let static_dir = tempfile::tempdir().unwrap();
    let app = pool_chem::routes::router(
        pool_chem::state::AppState::new(translator),
        static_dir.path(),
    );

    let response = send(app, "POST", REPORT_ROUTE, "{}").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
    assert!(body.get("status").is_none());
}

/// **VALUE**: A body-less POST is treated as "no readings", not rejected.
#[tokio::test]
async fn given_empty_body_when_posting_then_upstream_sees_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("no data")))
        .expect(1)
        .mount(&server)
        .await;
    let static_dir = tempfile::tempdir().unwrap();
    let app = app_for(&server, Some(TEST_API_KEY), static_dir.path());

    let response = send(app, "POST", REPORT_ROUTE, "").await;

    assert_eq!(response.status(), StatusCode::OK);
    let received = server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    let system = sent["messages"][0]["content"].as_str().unwrap();
    assert!(system.contains("\n{}\n"));
}

#[tokio::test]
async fn given_array_body_when_posting_then_400_and_no_upstream_call() {
    let server = MockServer::start().await;
    let static_dir = tempfile::tempdir().unwrap();
    let app = app_for(&server, Some(TEST_API_KEY), static_dir.path());

    let response = send(app, "POST", REPORT_ROUTE, "[7.2, 7.4]").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
    assert!(server.received_requests().await.unwrap().is_empty());
}

/// **VALUE**: The method check wins over body size.
///
/// **BUG THIS CATCHES**: Would catch the body being buffered before
/// validation, which turns an oversized GET into a 413 instead of the JSON 405.
#[tokio::test]
async fn given_oversized_non_post_when_requesting_report_then_405() {
    let server = MockServer::start().await;
    let static_dir = tempfile::tempdir().unwrap();
    let app = app_for(&server, Some(TEST_API_KEY), static_dir.path());
    let oversized = "x".repeat(MAX_BODY_BYTES + 1);

    let response = send(app, "GET", REPORT_ROUTE, &oversized).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_json(response).await, json!({"error": "Method not allowed"}));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_oversized_post_when_requesting_report_then_400_and_no_upstream_call() {
    let server = MockServer::start().await;
    let static_dir = tempfile::tempdir().unwrap();
    let app = app_for(&server, Some(TEST_API_KEY), static_dir.path());
    let oversized = format!(r#"{{"notes": "{}"}}"#, "x".repeat(MAX_BODY_BYTES));

    let response = send(app, "POST", REPORT_ROUTE, &oversized).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
    assert!(server.received_requests().await.unwrap().is_empty());
}
