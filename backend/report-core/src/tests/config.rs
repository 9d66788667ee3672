// Unit tests for UpstreamConfig loading
// Everything goes through from_lookup, so no test touches the real environment

use crate::config::{
    API_KEY_ENV, BASE_URL_ENV, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT, GenerationSettings, MAX_TOKENS_ENV, MODEL_ENV, PROJECT_ID_ENV,
    TEMPERATURE_ENV, TIMEOUT_ENV, UpstreamConfig,
};
use crate::error::ConfigError;
use crate::upstream::EndpointShape;

use std::collections::HashMap;
use std::time::Duration;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let values: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| values.get(name).cloned()
}

/// **VALUE**: An empty environment still yields a usable config.
///
/// **WHY THIS MATTERS**: The server must start without a credential and answer
/// each request with a clear "missing credential" error instead of refusing to boot.
#[test]
fn given_empty_environment_when_loading_then_defaults_apply() {
    // GIVEN/WHEN: Nothing set
    let config = UpstreamConfig::from_lookup(lookup_from(&[])).unwrap();

    // THEN: Defaults, no credential, account-scoped endpoint
    assert!(config.api_key().is_none());
    assert!(config.project_id().is_none());
    assert_eq!(config.generation().model, DEFAULT_MODEL);
    assert_eq!(config.generation().max_tokens, DEFAULT_MAX_TOKENS);
    assert_eq!(config.generation().temperature, DEFAULT_TEMPERATURE);
    assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    assert_eq!(
        config.endpoint().url().as_str(),
        "https://api.openai.com/v1/chat/completions"
    );
}

#[test]
fn given_all_values_when_loading_then_each_is_applied() {
    let config = UpstreamConfig::from_lookup(lookup_from(&[
        (API_KEY_ENV, "sk-proj-0123456789abcdef"),
        (PROJECT_ID_ENV, "proj_pool"),
        (BASE_URL_ENV, "http://localhost:8080/openai/"),
        (MODEL_ENV, "gpt-4o"),
        (MAX_TOKENS_ENV, "1200"),
        (TEMPERATURE_ENV, "0.3"),
        (TIMEOUT_ENV, "15"),
    ]))
    .unwrap();

    assert_eq!(
        config.api_key().map(|k| k.expose()),
        Some("sk-proj-0123456789abcdef")
    );
    assert_eq!(config.project_id(), Some("proj_pool"));
    assert_eq!(
        config.generation(),
        &GenerationSettings {
            model: String::from("gpt-4o"),
            max_tokens: 1200,
            temperature: 0.3,
        }
    );
    assert_eq!(config.timeout(), Duration::from_secs(15));
    assert_eq!(
        config.endpoint().url().as_str(),
        "http://localhost:8080/openai/v1/projects/proj_pool/chat/completions"
    );
}

/// **VALUE**: Blank values behave as unset.
///
/// **BUG THIS CATCHES**: `OPENAI_PROJECT_ID=` in a `.env` would otherwise select
/// the project-scoped URL with an empty segment, which the provider rejects.
#[test]
fn given_blank_values_when_loading_then_treated_as_unset() {
    let config = UpstreamConfig::from_lookup(lookup_from(&[
        (API_KEY_ENV, "   "),
        (PROJECT_ID_ENV, ""),
        (MODEL_ENV, " "),
    ]))
    .unwrap();

    assert!(config.api_key().is_none());
    assert!(config.project_id().is_none());
    assert_eq!(config.endpoint().shape(), &EndpointShape::AccountScoped);
    assert_eq!(config.generation().model, DEFAULT_MODEL);
}

#[test]
fn given_temperature_out_of_range_when_loading_then_rejected() {
    let result = UpstreamConfig::from_lookup(lookup_from(&[(TEMPERATURE_ENV, "2.5")]));

    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue { name, .. }) if name == TEMPERATURE_ENV
    ));
}

#[test]
fn given_zero_max_tokens_when_loading_then_rejected() {
    let result = UpstreamConfig::from_lookup(lookup_from(&[(MAX_TOKENS_ENV, "0")]));

    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue { name, .. }) if name == MAX_TOKENS_ENV
    ));
}

#[test]
fn given_unparsable_number_when_loading_then_error_names_variable() {
    let result = UpstreamConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "soon")]));

    let err = result.unwrap_err();
    let message = err.to_string();
    assert!(message.contains(TIMEOUT_ENV), "got: {message}");
    assert!(message.contains("soon"), "got: {message}");
}

#[test]
fn given_zero_timeout_when_loading_then_rejected() {
    let result = UpstreamConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "0")]));

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

/// **VALUE**: Only http(s) upstreams are accepted.
///
/// **BUG THIS CATCHES**: A typo like `OPENAI_BASE_URL=api.openai.com` or a
/// `file://` URL would otherwise fail on every request instead of at startup.
#[test]
fn given_non_http_base_url_when_loading_then_rejected() {
    let relative = UpstreamConfig::from_lookup(lookup_from(&[(BASE_URL_ENV, "api.openai.com")]));
    let file = UpstreamConfig::from_lookup(lookup_from(&[(BASE_URL_ENV, "file:///tmp/openai")]));

    assert!(matches!(relative, Err(ConfigError::InvalidBaseUrl { .. })));
    assert!(matches!(file, Err(ConfigError::InvalidBaseUrl { .. })));
}

#[test]
fn given_config_when_debug_formatted_then_credential_hidden() {
    let secret = "sk-proj-verysecretvalue123456";
    let config = UpstreamConfig::new(Some(secret.to_string()), None).unwrap();

    let debug = format!("{config:?}");

    assert!(!debug.contains(secret));
}
