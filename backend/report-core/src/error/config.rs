use common::ErrorLocation;

use thiserror::Error;

/// Configuration problems detected while building an [`crate::UpstreamConfig`].
///
/// These are startup failures. A *missing* credential is not one
/// of them: it is reported per request as [`crate::error::ReportError::ConfigMissing`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Value Error: {name}: {reason} {location}")]
    InvalidValue {
        location: ErrorLocation,
        name: &'static str,
        reason: String,
    },

    #[error("Config Base URL Error: {reason} {location}")]
    InvalidBaseUrl {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Config Endpoint Error: {reason} {location}")]
    Endpoint {
        location: ErrorLocation,
        reason: String,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn invalid_value(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            location: ErrorLocation::caller(),
            name,
            reason: reason.into(),
        }
    }

    #[track_caller]
    pub fn invalid_base_url(reason: impl Into<String>) -> Self {
        ConfigError::InvalidBaseUrl {
            location: ErrorLocation::caller(),
            reason: reason.into(),
        }
    }

    #[track_caller]
    pub fn endpoint(reason: impl Into<String>) -> Self {
        ConfigError::Endpoint {
            location: ErrorLocation::caller(),
            reason: reason.into(),
        }
    }
}

impl From<url::ParseError> for ConfigError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ConfigError::InvalidBaseUrl {
            location: ErrorLocation::caller(),
            reason: error.to_string(),
        }
    }
}
