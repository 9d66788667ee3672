//! Outbound side of the translator: request construction and dispatch.

pub mod endpoint;
pub mod http;
pub mod wire;

pub use endpoint::{Endpoint, EndpointShape};
pub use http::HttpTransport;
pub use wire::{ChatCompletionRequest, ChatMessage, ChatRole};

use crate::config::UpstreamConfig;

use common::{HttpStatusCode, RedactedCredential};

use async_trait::async_trait;
use log::debug;
use url::Url;

/// A fully built completion request, ready for a transport.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub url: Url,
    pub credential: RedactedCredential,
    pub body: ChatCompletionRequest,
}

impl UpstreamRequest {
    pub fn build(prompt: &str, config: &UpstreamConfig, credential: &RedactedCredential) -> Self {
        Self {
            url: config.endpoint().url().clone(),
            credential: credential.clone(),
            body: ChatCompletionRequest::for_prompt(prompt, config.generation()),
        }
    }
}

/// What came back from the wire, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawUpstreamResponse {
    /// No HTTP response at all: connect failure, timeout, broken body.
    Unreachable {
        message: String,
        is_timeout: bool,
        is_connection: bool,
    },
    /// Any HTTP response, whatever its status.
    Received { status: HttpStatusCode, body: String },
}

/// The single network seam of the translator.
///
/// Implementations must not fail: transport problems are reported as
/// [`RawUpstreamResponse::Unreachable`].
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn send(&self, request: UpstreamRequest) -> RawUpstreamResponse;
}

/// Send one completion request for `prompt` and wait for the raw reply.
pub async fn dispatch(
    prompt: &str,
    config: &UpstreamConfig,
    credential: &RedactedCredential,
    transport: &dyn CompletionTransport,
) -> RawUpstreamResponse {
    let request = UpstreamRequest::build(prompt, config, credential);
    debug!(
        "Dispatching completion request to {} ({}, model {})",
        request.url,
        config.endpoint().shape(),
        request.body.model
    );
    transport.send(request).await
}
