//! Request validation, reply interpretation, and the translator pipeline.

use crate::config::{API_KEY_ENV, UpstreamConfig};
use crate::error::report::GENERIC_REJECTION_MESSAGE;
use crate::error::{ReportError, UpstreamError};
use crate::prompt::build_prompt;
use crate::reading::ReadingInput;
use crate::upstream::{CompletionTransport, HttpTransport, RawUpstreamResponse, dispatch, wire};

use common::RedactedCredential;

use std::sync::Arc;

use log::{debug, error, info, warn};
use reqwest::Method;

/// Returned with 200 when the provider answers 2xx without usable content.
pub const FALLBACK_REPORT: &str = "No response generated.";

/// A generated markdown report. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    markdown: String,
    fallback: bool,
}

impl Report {
    fn generated(markdown: String) -> Self {
        Self {
            markdown,
            fallback: false,
        }
    }

    fn fallback() -> Self {
        Self {
            markdown: FALLBACK_REPORT.to_string(),
            fallback: true,
        }
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn into_markdown(self) -> String {
        self.markdown
    }

    /// Whether the provider's reply was unusable and [`FALLBACK_REPORT`] was substituted.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

pub type ReportResult = Result<Report, ReportError>;

/// Guard clauses run before any other work.
///
/// Only `POST` generates reports. On success, yields the credential the
/// request will be sent with.
#[track_caller]
pub fn validate_request<'a>(
    method: &Method,
    config: &'a UpstreamConfig,
) -> Result<&'a RedactedCredential, ReportError> {
    if *method != Method::POST {
        return Err(ReportError::method_not_allowed(method.as_str()));
    }

    match config.api_key() {
        Some(credential) => Ok(credential),
        None => Err(ReportError::config_missing(API_KEY_ENV)),
    }
}

/// Turn a raw upstream reply into the caller-facing result.
///
/// | transport | status  | content            | result                 |
/// |-----------|---------|--------------------|------------------------|
/// | failed    | -       | -                  | `UpstreamUnreachable`  |
/// | ok        | non-2xx | -                  | `UpstreamRejected`     |
/// | ok        | 2xx     | missing/malformed  | [`FALLBACK_REPORT`]    |
/// | ok        | 2xx     | present            | content, trimmed       |
#[track_caller]
pub fn interpret(raw: RawUpstreamResponse) -> ReportResult {
    match raw {
        RawUpstreamResponse::Unreachable {
            message,
            is_timeout,
            is_connection,
        } => Err(ReportError::upstream_unreachable(
            message,
            is_timeout,
            is_connection,
        )),
        RawUpstreamResponse::Received { status, body } if !status.is_success() => {
            let message = wire::rejection_message(&body)
                .unwrap_or_else(|| GENERIC_REJECTION_MESSAGE.to_string());
            Err(ReportError::upstream_rejected(status, message))
        }
        RawUpstreamResponse::Received { body, .. } => Ok(wire::completion_content(&body)
            .map(Report::generated)
            .unwrap_or_else(Report::fallback)),
    }
}

/// The whole request pipeline behind one cheap-to-clone handle.
///
/// Holds no mutable state, so clones can serve concurrent requests.
#[derive(Clone)]
pub struct ReportTranslator {
    config: Arc<UpstreamConfig>,
    transport: Arc<dyn CompletionTransport>,
}

impl ReportTranslator {
    pub fn new(config: UpstreamConfig, transport: Arc<dyn CompletionTransport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Translator backed by the reqwest transport, honouring the config timeout.
    pub fn with_http_transport(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let transport = HttpTransport::from_config(&config)?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Guard clauses for this translator's config; see [`validate_request`].
    #[track_caller]
    pub fn validate(&self, method: &Method) -> Result<&RedactedCredential, ReportError> {
        validate_request(method, &self.config)
    }

    /// validate -> parse readings -> build prompt -> dispatch -> interpret.
    ///
    /// Validation failures return before the body is parsed and before any
    /// network traffic.
    pub async fn generate(&self, method: &Method, body: &[u8]) -> ReportResult {
        let credential = self.validate(method)?;
        self.generate_from_body(credential, body).await
    }

    /// The pipeline after [`ReportTranslator::validate`] has passed.
    ///
    /// Lets a caller hold off reading the request body until the method and
    /// credential checks are done.
    pub async fn generate_from_body(
        &self,
        credential: &RedactedCredential,
        body: &[u8],
    ) -> ReportResult {
        let input = ReadingInput::from_json_slice(body)?;
        self.generate_for(credential, &input).await
    }

    async fn generate_for(
        &self,
        credential: &RedactedCredential,
        input: &ReadingInput,
    ) -> ReportResult {
        if !input.has_pool_volume() {
            debug!("Readings carry no pool volume; dosages will be left to the model");
        }

        let prompt = build_prompt(input);
        debug!(
            "Built prompt ({} chars) from {} readings",
            prompt.len(),
            input.len()
        );

        let raw = dispatch(&prompt, &self.config, credential, self.transport.as_ref()).await;
        let result = interpret(raw);

        match &result {
            Ok(report) if report.is_fallback() => {
                warn!("Upstream returned no usable content, sending fallback report")
            }
            Ok(report) => info!("Report generated ({} chars)", report.markdown().len()),
            Err(e) => match e.upstream_status() {
                Some(status) => error!(
                    "Upstream rejected request [{}]: HTTP {status} - {}",
                    e.error_category(),
                    e.client_message()
                ),
                None => error!("Report generation failed [{}]: {e}", e.error_category()),
            },
        }

        result
    }
}
