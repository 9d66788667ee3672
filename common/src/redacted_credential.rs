//! Secure credential handling with redacted Debug/Display output.

use crate::RedactError;

use std::fmt;

use serde::ser::Error;
use zeroize::Zeroize;

/// An upstream credential that never exposes its value in logs or debug output.
///
/// Blank values are not credentials: [`RedactedCredential::from_env_value`]
/// maps them to `None` so "set but empty" behaves like "unset".
#[derive(Clone)]
pub struct RedactedCredential {
    inner: String,
}

impl RedactedCredential {
    /// Wrap a credential value, trimming surrounding whitespace.
    pub fn new(value: impl Into<String>) -> Self {
        let mut raw = value.into();
        let trimmed = raw.trim().to_string();
        raw.zeroize();
        Self { inner: trimmed }
    }

    /// Wrap an optional raw value as read from the environment.
    pub fn from_env_value(value: Option<String>) -> Option<Self> {
        value
            .map(Self::new)
            .filter(|credential| !credential.is_empty())
    }

    /// Get the actual value for transmission.
    ///
    /// # Security Note
    /// Only call this when building the outbound `Authorization` header.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Credential length (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for RedactedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedCredential([REDACTED])")
    }
}

impl fmt::Display for RedactedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED CREDENTIAL]")
    }
}

impl Drop for RedactedCredential {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Refuse to end up in JSON bodies or log records by accident.
impl serde::Serialize for RedactedCredential {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::serialization(
            "RedactedCredential cannot be serialized - use expose() explicitly",
        )))
    }
}
