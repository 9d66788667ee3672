//! Upstream configuration.
//!
//! Values are supplied through a lookup function (normally a thin wrapper
//! over `std::env::var`), so the translator never touches the process
//! environment and tests never need to mutate it.

use crate::error::ConfigError;
use crate::upstream::endpoint::Endpoint;

use common::RedactedCredential;

use std::time::Duration;

use log::{debug, info, warn};
use url::Url;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const PROJECT_ID_ENV: &str = "OPENAI_PROJECT_ID";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const MODEL_ENV: &str = "OPENAI_MODEL";
pub const MAX_TOKENS_ENV: &str = "OPENAI_MAX_TOKENS";
pub const TEMPERATURE_ENV: &str = "OPENAI_TEMPERATURE";
pub const TIMEOUT_ENV: &str = "OPENAI_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 800;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const MAX_TEMPERATURE: f64 = 2.0;

// ============================================
// GENERATION SETTINGS
// ============================================

/// Model parameters sent with every completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl GenerationSettings {
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::invalid_value(MODEL_ENV, "model id is empty"));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::invalid_value(
                MAX_TOKENS_ENV,
                "max tokens must be greater than zero",
            ));
        }
        if !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(ConfigError::invalid_value(
                TEMPERATURE_ENV,
                format!(
                    "temperature {} outside 0.0..={MAX_TEMPERATURE}",
                    self.temperature
                ),
            ));
        }
        Ok(())
    }
}

// ============================================
// UPSTREAM CONFIG
// ============================================

/// Everything the translator needs to talk to the completion provider.
///
/// The endpoint is resolved once here. Every request made with this config
/// uses the same endpoint shape.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    api_key: Option<RedactedCredential>,
    project_id: Option<String>,
    endpoint: Endpoint,
    generation: GenerationSettings,
    timeout: Duration,
}

impl UpstreamConfig {
    /// Config against the default upstream host with default generation settings.
    ///
    /// Blank values count as unset.
    pub fn new(api_key: Option<String>, project_id: Option<String>) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(DEFAULT_BASE_URL)?;
        let project_id = non_blank(project_id);
        let endpoint = Endpoint::resolve(&base_url, project_id.as_deref())?;

        Ok(Self {
            api_key: RedactedCredential::from_env_value(api_key),
            project_id,
            endpoint,
            generation: GenerationSettings::default(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Point the config at another OpenAI-compatible host (proxy, mock server).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(base_url)?;
        self.endpoint = Endpoint::resolve(&base_url, self.project_id.as_deref())?;
        Ok(self)
    }

    pub fn with_generation(mut self, generation: GenerationSettings) -> Result<Self, ConfigError> {
        generation.validate()?;
        self.generation = generation;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a config from named values.
    ///
    /// # Arguments
    /// * `lookup` - returns the raw value for a variable name, `None` when unset
    ///
    /// # Errors
    /// Returns [`ConfigError`] for values that are present but unusable. A
    /// missing credential is *not* an error here.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(lookup(API_KEY_ENV), lookup(PROJECT_ID_ENV))?;

        if let Some(base_url) = non_blank(lookup(BASE_URL_ENV)) {
            config = config.with_base_url(&base_url)?;
        }

        let mut generation = GenerationSettings::default();
        if let Some(model) = non_blank(lookup(MODEL_ENV)) {
            generation.model = model;
        }
        if let Some(max_tokens) = non_blank(lookup(MAX_TOKENS_ENV)) {
            generation.max_tokens = parse_number(MAX_TOKENS_ENV, &max_tokens)?;
        }
        if let Some(temperature) = non_blank(lookup(TEMPERATURE_ENV)) {
            generation.temperature = parse_number(TEMPERATURE_ENV, &temperature)?;
        }
        config = config.with_generation(generation)?;

        if let Some(timeout) = non_blank(lookup(TIMEOUT_ENV)) {
            let seconds: u64 = parse_number(TIMEOUT_ENV, &timeout)?;
            if seconds == 0 {
                return Err(ConfigError::invalid_value(
                    TIMEOUT_ENV,
                    "timeout must be at least one second",
                ));
            }
            config = config.with_timeout(Duration::from_secs(seconds));
        }

        config.log_summary();
        Ok(config)
    }

    pub fn api_key(&self) -> Option<&RedactedCredential> {
        self.api_key.as_ref()
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn generation(&self) -> &GenerationSettings {
        &self.generation
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn log_summary(&self) {
        match &self.api_key {
            Some(key) => info!(
                "Upstream credential loaded from {API_KEY_ENV} ({} chars)",
                key.len()
            ),
            None => warn!("Missing {API_KEY_ENV}: report requests will fail until it is set"),
        }
        if self.project_id.is_none() {
            warn!("Missing {PROJECT_ID_ENV} (optional but recommended)");
        }
        info!(
            "Upstream endpoint: {} ({})",
            self.endpoint.url(),
            self.endpoint.shape().label()
        );
        debug!(
            "Generation settings: model={}, max_tokens={}, temperature={}, timeout={}s",
            self.generation.model,
            self.generation.max_tokens,
            self.generation.temperature,
            self.timeout.as_secs()
        );
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[track_caller]
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid_base_url(format!(
            "unsupported scheme '{}' (expected http or https)",
            url.scheme()
        )));
    }
    Ok(url)
}

#[track_caller]
fn parse_number<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ConfigError::invalid_value(name, format!("'{raw}': {e}")))
}
