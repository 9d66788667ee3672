// Unit tests for ReadingInput body parsing

use crate::error::ReportError;
use crate::reading::ReadingInput;

use serde_json::json;

/// **VALUE**: An absent body is "no readings", not an error.
///
/// **WHY THIS MATTERS**: Callers may POST without a body; the model is expected
/// to say that nothing was supplied.
#[test]
fn given_empty_body_when_parsing_then_empty_input() {
    assert!(ReadingInput::from_json_slice(b"").unwrap().is_empty());
    assert!(ReadingInput::from_json_slice(b"  \n").unwrap().is_empty());
    assert!(ReadingInput::from_json_slice(b"null").unwrap().is_empty());
}

#[test]
fn given_object_body_when_parsing_then_keys_pass_through() {
    let input =
        ReadingInput::from_json_slice(br#"{"ph": 7.9, "fc": 1.5, "mystery_reading": "high"}"#)
            .unwrap();

    assert_eq!(input.len(), 3);
    let echoed = serde_json::to_value(&input).unwrap();
    assert_eq!(echoed["ph"], json!(7.9));
    assert_eq!(echoed["mystery_reading"], json!("high"));
}

#[test]
fn given_malformed_json_when_parsing_then_invalid_input() {
    let result = ReadingInput::from_json_slice(b"{\"ph\": ");

    assert!(matches!(result, Err(ReportError::InvalidInput { .. })));
}

#[test]
fn given_non_object_json_when_parsing_then_invalid_input() {
    for body in [&b"[1, 2]"[..], b"42", b"\"ph 7.4\""] {
        let result = ReadingInput::from_json_slice(body);
        assert!(
            matches!(result, Err(ReportError::InvalidInput { .. })),
            "body {:?} should be rejected",
            String::from_utf8_lossy(body)
        );
    }
}

#[test]
fn given_pool_volume_when_checking_then_detected() {
    let with = ReadingInput::from_json_slice(br#"{"pool_volume": 50000}"#).unwrap();
    let null = ReadingInput::from_json_slice(br#"{"pool_volume": null}"#).unwrap();
    let without = ReadingInput::from_json_slice(br#"{"ph": 7.2}"#).unwrap();

    assert!(with.has_pool_volume());
    assert!(!null.has_pool_volume());
    assert!(!without.has_pool_volume());
}
