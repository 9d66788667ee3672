// Unit tests for status classification

use crate::HttpStatusCode;

#[test]
fn given_2xx_when_classified_then_success() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(204).is_success());
    assert!(!HttpStatusCode(199).is_success());
    assert!(!HttpStatusCode(300).is_success());
}

/// **VALUE**: Only genuine 4xx/5xx codes are handed back to callers.
///
/// **BUG THIS CATCHES**: Passing a 302 or 600 through would produce a
/// response line the caller cannot interpret as a failure.
#[test]
fn given_status_when_checking_passthrough_then_only_errors_qualify() {
    assert!(HttpStatusCode(429).is_passthrough_error());
    assert!(HttpStatusCode(401).is_passthrough_error());
    assert!(HttpStatusCode(503).is_passthrough_error());
    assert!(!HttpStatusCode(200).is_passthrough_error());
    assert!(!HttpStatusCode(302).is_passthrough_error());
    assert!(!HttpStatusCode(600).is_passthrough_error());
}

#[test]
fn given_status_when_serialized_then_plain_number() {
    let json = serde_json::to_string(&HttpStatusCode(429)).unwrap();

    assert_eq!(json, "429");
}
