// Unit tests for the guard clauses

use crate::config::{API_KEY_ENV, UpstreamConfig};
use crate::error::ReportError;
use crate::report::validate_request;

use reqwest::Method;

fn configured() -> UpstreamConfig {
    UpstreamConfig::new(Some(String::from("sk-test-0123456789abcdef")), None).unwrap()
}

#[test]
fn given_non_post_methods_when_validating_then_method_not_allowed() {
    let config = configured();

    for method in [
        Method::GET,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
        Method::HEAD,
        Method::OPTIONS,
    ] {
        let result = validate_request(&method, &config);
        assert!(
            matches!(result, Err(ReportError::MethodNotAllowed { .. })),
            "{method} should be rejected"
        );
    }
}

/// **VALUE**: The method check wins over the credential check.
///
/// **WHY THIS MATTERS**: A GET against an unconfigured server is a client
/// mistake (405), not a server problem (500).
#[test]
fn given_get_without_credential_when_validating_then_method_not_allowed_first() {
    let config = UpstreamConfig::new(None, None).unwrap();

    let result = validate_request(&Method::GET, &config);

    assert!(matches!(result, Err(ReportError::MethodNotAllowed { .. })));
}

#[test]
fn given_post_without_credential_when_validating_then_config_missing_names_variable() {
    let config = UpstreamConfig::new(None, Some(String::from("proj_only"))).unwrap();

    let err = validate_request(&Method::POST, &config).unwrap_err();

    assert!(matches!(err, ReportError::ConfigMissing { which, .. } if which == API_KEY_ENV));
    assert_eq!(err.client_message(), "Missing OPENAI_API_KEY in environment");
}

/// **VALUE**: The project id is advisory; its absence never blocks.
#[test]
fn given_post_with_credential_and_no_project_when_validating_then_ok() {
    let config = configured();

    let credential = validate_request(&Method::POST, &config).unwrap();

    assert_eq!(credential.expose(), "sk-test-0123456789abcdef");
}
