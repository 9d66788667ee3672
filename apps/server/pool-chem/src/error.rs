use common::ErrorLocation;

use report_core::error::{ConfigError, ReportError, UpstreamError};

use axum::Json;
use axum::http::header::ALLOW;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that stop the server from starting or keep it from serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Settings Error: {message} {location}")]
    Settings {
        message: String,
        location: ErrorLocation,
    },

    #[error("Logger Error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Bind Error: {address}: {source} {location}")]
    Bind {
        address: String,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Serve Error: {source} {location}")]
    Serve {
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },
}

impl ServerError {
    #[track_caller]
    pub fn settings(message: impl Into<String>) -> Self {
        ServerError::Settings {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        ServerError::Logger {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }
}

/// JSON error body: `{"error": "...", "status": 429}`.
///
/// `status` is present only when the upstream provider rejected the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// HTTP face of a [`ReportError`].
#[derive(Debug)]
pub struct ApiError(pub ReportError);

impl From<ReportError> for ApiError {
    fn from(error: ReportError) -> Self {
        ApiError(error)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            ReportError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ReportError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ReportError::ConfigMissing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ReportError::UpstreamUnreachable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ReportError::UpstreamRejected { status, .. } if status.is_passthrough_error() => {
                StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ReportError::UpstreamRejected { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.0.client_message(),
            status: self.0.upstream_status().map(|status| status.as_u16()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status_code(), Json(self.body())).into_response();
        if matches!(self.0, ReportError::MethodNotAllowed { .. }) {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static("POST"));
        }
        response
    }
}
