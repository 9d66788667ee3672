use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when code tries to move a redacted secret somewhere it can leak.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Credential Serialization Refused: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },
}

impl RedactError {
    #[track_caller]
    pub fn serialization(message: impl Into<String>) -> Self {
        RedactError::Serialization {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }
}
