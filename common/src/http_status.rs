//! HTTP status code utilities for classifying upstream replies.

use serde::Serialize;

/// HTTP status code as reported by a remote service.
///
/// Stored directly rather than parsed from error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// 4xx client errors.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// 5xx server errors.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }

    /// Whether this code may be handed back to our own callers unchanged.
    ///
    /// Only 4xx/5xx qualify: an upstream 1xx/3xx or an out-of-range value
    /// must not leak into our response line.
    pub fn is_passthrough_error(&self) -> bool {
        self.is_client_error() || self.is_server_error()
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
