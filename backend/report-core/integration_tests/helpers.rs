//! Test helpers for translator integration tests.
//!
//! Spins up a wiremock server standing in for the completion provider and
//! builds translators pointed at it.

use report_core::ReportTranslator;
use report_core::config::UpstreamConfig;

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "sk-test-integration-0123456789";
pub const TEST_PROJECT_ID: &str = "proj_integration";

/// Config pointed at `server`, account-scoped unless a project id is given.
pub fn config_for(server: &MockServer, project_id: Option<&str>) -> UpstreamConfig {
    UpstreamConfig::new(
        Some(TEST_API_KEY.to_string()),
        project_id.map(str::to_string),
    )
    .expect("valid config")
    .with_base_url(&server.uri())
    .expect("mock server URI is a valid base")
}

pub fn translator_for(server: &MockServer, project_id: Option<&str>) -> ReportTranslator {
    ReportTranslator::with_http_transport(config_for(server, project_id))
        .expect("HTTP transport should build")
}

/// Translator with a short timeout, for delay-based tests.
pub fn impatient_translator_for(server: &MockServer, timeout: Duration) -> ReportTranslator {
    let config = config_for(server, None).with_timeout(timeout);
    ReportTranslator::with_http_transport(config).expect("HTTP transport should build")
}

pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}
