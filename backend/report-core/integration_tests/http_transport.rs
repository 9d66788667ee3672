// Integration tests for the reqwest transport against a mock provider
// These exercise real HTTP, real timeouts and real connection failures

use crate::helpers::{
    TEST_API_KEY, TEST_PROJECT_ID, completion_body, impatient_translator_for, translator_for,
};

use report_core::ReportTranslator;
use report_core::config::UpstreamConfig;
use report_core::error::ReportError;
use report_core::report::FALLBACK_REPORT;

use common::HttpStatusCode;

use std::net::TcpListener;
use std::time::Duration;

use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Happy path over real HTTP, including the bearer header and body shape.
///
/// **BUG THIS CATCHES**: Would catch the credential being sent under another
/// header, or the body missing the model/generation parameters.
#[tokio::test]
async fn given_provider_ok_when_generating_then_report_returned() {
    // GIVEN: A provider that only answers correctly-shaped requests
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", format!("Bearer {TEST_API_KEY}").as_str()))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 800,
            "temperature": 0.7
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("\n## Analysis\nAll good.\n")),
        )
        .expect(1)
        .mount(&server)
        .await;
    let translator = translator_for(&server, None);

    // WHEN: Generating a report
    let report = translator
        .generate(&Method::POST, br#"{"ph": 7.4, "pool_volume": 40000}"#)
        .await
        .unwrap();

    // THEN: Content is returned trimmed
    assert_eq!(report.markdown(), "## Analysis\nAll good.");
}

#[tokio::test]
async fn given_project_id_when_generating_then_project_path_hit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/projects/{TEST_PROJECT_ID}/chat/completions")))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("project report")))
        .expect(1)
        .mount(&server)
        .await;
    let translator = translator_for(&server, Some(TEST_PROJECT_ID));

    let report = translator.generate(&Method::POST, b"{}").await.unwrap();

    assert_eq!(report.markdown(), "project report");

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0].url.path(),
        "/v1/projects/proj_integration/chat/completions"
    );
}

/// **VALUE**: Provider rejections keep their status and message.
#[tokio::test]
async fn given_provider_429_when_generating_then_rejected_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"error": {"message": "rate limited"}})),
        )
        .mount(&server)
        .await;
    let translator = translator_for(&server, None);

    let err = translator.generate(&Method::POST, b"{}").await.unwrap_err();

    assert!(matches!(err, ReportError::UpstreamRejected { .. }));
    assert_eq!(err.upstream_status(), Some(HttpStatusCode(429)));
    assert_eq!(err.client_message(), "rate limited");
}

#[tokio::test]
async fn given_provider_200_without_choices_when_generating_then_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;
    let translator = translator_for(&server, None);

    let report = translator.generate(&Method::POST, b"{}").await.unwrap();

    assert_eq!(report.markdown(), FALLBACK_REPORT);
}

/// **VALUE**: A provider nobody is listening for is reported as unreachable.
///
/// **WHY THIS MATTERS**: Connection refusals have no status code and must not be
/// confused with rejections.
#[tokio::test]
async fn given_nothing_listening_when_generating_then_unreachable() {
    // GIVEN: A translator pointed at a port that was just released
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = UpstreamConfig::new(Some(TEST_API_KEY.to_string()), None)
        .unwrap()
        .with_base_url(&format!("http://127.0.0.1:{port}"))
        .unwrap();
    let translator = ReportTranslator::with_http_transport(config).unwrap();

    // WHEN: Generating
    let err = translator.generate(&Method::POST, b"{}").await.unwrap_err();

    // THEN: Unreachable, no upstream status
    assert!(matches!(err, ReportError::UpstreamUnreachable { .. }));
    assert_eq!(err.upstream_status(), None);
    assert_eq!(err.error_category(), "connection");
}

#[tokio::test]
async fn given_slow_provider_when_generating_then_timeout_is_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("too late"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    let translator = impatient_translator_for(&server, Duration::from_millis(200));

    let err = translator.generate(&Method::POST, b"{}").await.unwrap_err();

    match err {
        ReportError::UpstreamUnreachable { is_timeout, .. } => assert!(is_timeout),
        other => panic!("expected timeout, got {other:?}"),
    }
}
