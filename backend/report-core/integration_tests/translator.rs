// Integration tests for the guard clauses with a live mock provider
// The mock's request log proves what never left the process

use crate::helpers::{completion_body, config_for};

use report_core::ReportTranslator;
use report_core::config::UpstreamConfig;
use report_core::error::ReportError;

use reqwest::Method;
use serde_json::Value;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_get_when_generating_then_provider_never_called() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
        .expect(0)
        .mount(&server)
        .await;
    let translator = ReportTranslator::with_http_transport(config_for(&server, None)).unwrap();

    let result = translator.generate(&Method::GET, b"").await;

    assert!(matches!(result, Err(ReportError::MethodNotAllowed { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_no_credential_when_generating_then_provider_never_called() {
    let server = MockServer::start().await;
    let config = UpstreamConfig::new(None, None)
        .unwrap()
        .with_base_url(&server.uri())
        .unwrap();
    let translator = ReportTranslator::with_http_transport(config).unwrap();

    let result = translator.generate(&Method::POST, b"{}").await;

    assert!(matches!(result, Err(ReportError::ConfigMissing { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}

/// **VALUE**: Readings reach the provider inside the system message, untouched.
#[tokio::test]
async fn given_readings_when_generating_then_system_message_embeds_them() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
        .mount(&server)
        .await;
    let translator = ReportTranslator::with_http_transport(config_for(&server, None)).unwrap();

    translator
        .generate(&Method::POST, br#"{"orp": 640, "phosphates": 250}"#)
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    let system = body["messages"][0]["content"].as_str().unwrap();
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert!(system.contains("\"orp\": 640"));
    assert!(system.contains("\"phosphates\": 250"));
}
