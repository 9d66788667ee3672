//! Error taxonomy for a single report request.
//!
//! Key design decisions:
//! - Upstream status codes stored as [`HttpStatusCode`], never parsed from text
//! - Caller-facing messages are separate from `Display` (which carries the location)
//! - Empty/malformed 2xx replies are not errors at all; see [`crate::report::interpret`]

use common::{ErrorLocation, HttpStatusCode};

use thiserror::Error as ThisError;

/// Message used when the upstream rejects a request without saying why.
pub const GENERIC_REJECTION_MESSAGE: &str = "Upstream API returned an error";

/// Caller-facing text for a transport failure.
pub const UNREACHABLE_MESSAGE: &str = "Failed to reach the upstream completion service";

#[derive(Debug, ThisError)]
pub enum ReportError {
    #[error("Method Not Allowed: {method} {location}")]
    MethodNotAllowed {
        method: String,
        location: ErrorLocation,
    },

    #[error("Config Missing: {which} {location}")]
    ConfigMissing {
        which: &'static str,
        location: ErrorLocation,
    },

    #[error("Invalid Input: {message} {location}")]
    InvalidInput {
        message: String,
        location: ErrorLocation,
    },

    #[error("Upstream Unreachable: {message} {location}")]
    UpstreamUnreachable {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("Upstream Rejected: HTTP {status} - {message} {location}")]
    UpstreamRejected {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },
}

impl ReportError {
    #[track_caller]
    pub fn method_not_allowed(method: impl Into<String>) -> Self {
        ReportError::MethodNotAllowed {
            method: method.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn config_missing(which: &'static str) -> Self {
        ReportError::ConfigMissing {
            which,
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ReportError::InvalidInput {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn upstream_unreachable(
        message: impl Into<String>,
        is_timeout: bool,
        is_connection: bool,
    ) -> Self {
        ReportError::UpstreamUnreachable {
            message: message.into(),
            is_timeout,
            is_connection,
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn upstream_rejected(status: HttpStatusCode, message: impl Into<String>) -> Self {
        ReportError::UpstreamRejected {
            status,
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    /// Text safe to return to the caller: no source locations, no transport internals.
    pub fn client_message(&self) -> String {
        match self {
            ReportError::MethodNotAllowed { .. } => String::from("Method not allowed"),
            ReportError::ConfigMissing { which, .. } => {
                format!("Missing {which} in environment")
            }
            ReportError::InvalidInput { message, .. } => message.clone(),
            ReportError::UpstreamUnreachable { .. } => String::from(UNREACHABLE_MESSAGE),
            ReportError::UpstreamRejected { message, .. } => message.clone(),
        }
    }

    /// Upstream status, only for rejections.
    pub fn upstream_status(&self) -> Option<HttpStatusCode> {
        match self {
            ReportError::UpstreamRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short label for log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            ReportError::MethodNotAllowed { .. } => "method_not_allowed",
            ReportError::ConfigMissing { .. } => "config_missing",
            ReportError::InvalidInput { .. } => "invalid_input",
            ReportError::UpstreamUnreachable { is_timeout: true, .. } => "timeout",
            ReportError::UpstreamUnreachable { is_connection: true, .. } => "connection",
            ReportError::UpstreamUnreachable { .. } => "unreachable",
            ReportError::UpstreamRejected { status, .. } if status.is_client_error() => {
                "upstream_client_error"
            }
            ReportError::UpstreamRejected { status, .. } if status.is_server_error() => {
                "upstream_server_error"
            }
            ReportError::UpstreamRejected { .. } => "upstream_rejected",
        }
    }
}
