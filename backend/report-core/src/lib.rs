//! Report Request Translator for Pool ChemGPT.
//!
//! Turns a pool water reading into an upstream chat completion request and
//! turns whatever comes back into a stable [`report::ReportResult`]:
//!
//! ```text
//! validate_request -> ReadingInput -> build_prompt -> dispatch -> interpret
//! ```
//!
//! The crate never reads the process environment on its own. Configuration
//! arrives as an [`config::UpstreamConfig`] built by the caller, and the
//! network sits behind [`upstream::CompletionTransport`] so every step can be
//! exercised without a live provider.

pub mod config;
pub mod error;
pub mod prompt;
pub mod reading;
pub mod report;
pub mod upstream;

pub use config::UpstreamConfig;
pub use reading::ReadingInput;
pub use report::{Report, ReportResult, ReportTranslator};

#[cfg(test)]
mod tests;
