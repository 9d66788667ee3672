use crate::config::UpstreamConfig;
use crate::error::UpstreamError;
use crate::upstream::{CompletionTransport, RawUpstreamResponse, UpstreamRequest};

use common::HttpStatusCode;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

/// reqwest-backed transport used in production.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client whose timeout covers the whole exchange.
    pub fn new(timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        Self::new(config.timeout())
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn send(&self, request: UpstreamRequest) -> RawUpstreamResponse {
        let response = match self
            .client
            .post(request.url)
            .bearer_auth(request.credential.expose())
            .json(&request.body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => return unreachable(&error),
        };

        let status = HttpStatusCode(response.status().as_u16());

        match response.text().await {
            Ok(body) => RawUpstreamResponse::Received { status, body },
            Err(error) => unreachable(&error),
        }
    }
}

/// Categorize a reqwest failure before it is flattened to text.
fn unreachable(error: &reqwest::Error) -> RawUpstreamResponse {
    RawUpstreamResponse::Unreachable {
        message: error.to_string(),
        is_timeout: error.is_timeout(),
        is_connection: error.is_connect(),
    }
}
