//! Shared primitives for the Pool ChemGPT workspace.
//!
//! Nothing here knows about pools, prompts or HTTP routing. These are the
//! small building blocks the other crates lean on:
//!
//! - [`ErrorLocation`]: where an error was constructed (`#[track_caller]`)
//! - [`RedactedCredential`]: a secret that never prints and never serializes
//! - [`HttpStatusCode`]: a status code stored as data, not parsed from text

pub mod error;
pub mod http_status;
pub mod redacted_credential;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_credential::RedactedCredential;

#[cfg(test)]
mod tests;
