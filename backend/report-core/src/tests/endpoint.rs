// Unit tests for endpoint shape selection
// Sending the wrong URL shape for the credential type is a known rejection cause

use crate::config::UpstreamConfig;
use crate::upstream::{Endpoint, EndpointShape};

use url::Url;

fn base(raw: &str) -> Url {
    Url::parse(raw).unwrap()
}

/// **VALUE**: No project id means the account-scoped URL.
#[test]
fn given_no_project_id_when_resolving_then_shape_a() {
    let endpoint = Endpoint::resolve(&base("https://api.openai.com/"), None).unwrap();

    assert_eq!(endpoint.shape(), &EndpointShape::AccountScoped);
    assert_eq!(
        endpoint.url().as_str(),
        "https://api.openai.com/v1/chat/completions"
    );
}

/// **VALUE**: A project id switches to the project-scoped URL with the id interpolated.
///
/// **BUG THIS CATCHES**: Would catch the shape being chosen anywhere other than
/// here, or the id being dropped from the path.
#[test]
fn given_project_id_when_resolving_then_shape_b() {
    let endpoint =
        Endpoint::resolve(&base("https://api.openai.com/"), Some("proj_abc123")).unwrap();

    assert_eq!(
        endpoint.shape(),
        &EndpointShape::ProjectScoped {
            project_id: String::from("proj_abc123")
        }
    );
    assert_eq!(
        endpoint.url().as_str(),
        "https://api.openai.com/v1/projects/proj_abc123/chat/completions"
    );
}

#[test]
fn given_blank_project_id_when_selecting_then_account_scoped() {
    assert_eq!(EndpointShape::select(Some("  ")), EndpointShape::AccountScoped);
    assert_eq!(EndpointShape::select(None), EndpointShape::AccountScoped);
}

/// **VALUE**: A project id can never inject extra path segments.
#[test]
fn given_project_id_with_reserved_chars_when_resolving_then_single_encoded_segment() {
    let endpoint = Endpoint::resolve(&base("https://api.openai.com/"), Some("team/a b")).unwrap();

    assert_eq!(
        endpoint.url().as_str(),
        "https://api.openai.com/v1/projects/team%2Fa%20b/chat/completions"
    );
}

#[test]
fn given_base_with_path_prefix_when_resolving_then_prefix_kept() {
    let without_slash = Endpoint::resolve(&base("http://proxy.local/openai"), None).unwrap();
    let with_slash = Endpoint::resolve(&base("http://proxy.local/openai/"), None).unwrap();

    assert_eq!(
        without_slash.url().as_str(),
        "http://proxy.local/openai/v1/chat/completions"
    );
    assert_eq!(with_slash.url(), without_slash.url());
}

#[test]
fn given_base_with_query_when_resolving_then_query_dropped() {
    let endpoint = Endpoint::resolve(&base("https://api.openai.com/?debug=1#frag"), None).unwrap();

    assert_eq!(
        endpoint.url().as_str(),
        "https://api.openai.com/v1/chat/completions"
    );
}

/// **VALUE**: Changing the base URL after the project id keeps the chosen shape.
#[test]
fn given_project_config_when_base_url_changes_then_shape_preserved() {
    let config = UpstreamConfig::new(
        Some(String::from("sk-test-key-0000000000")),
        Some(String::from("proj_x")),
    )
    .unwrap()
    .with_base_url("http://127.0.0.1:9999")
    .unwrap();

    assert_eq!(
        config.endpoint().url().as_str(),
        "http://127.0.0.1:9999/v1/projects/proj_x/chat/completions"
    );
}
