pub mod config;
pub mod report;
pub mod upstream;

pub use config::ConfigError;
pub use report::ReportError;
pub use upstream::UpstreamError;
