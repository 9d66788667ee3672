use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Failures building the outbound HTTP transport.
#[derive(Debug, ThisError)]
pub enum UpstreamError {
    #[error("HTTP Client Error: {message} {location}")]
    Client {
        message: String,
        location: ErrorLocation,
    },
}

impl From<reqwest::Error> for UpstreamError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        UpstreamError::Client {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}
