// Unit tests for reply interpretation
// The three-way split (unreachable / rejected / malformed-but-2xx) is caller-visible

use crate::error::ReportError;
use crate::error::report::GENERIC_REJECTION_MESSAGE;
use crate::report::{FALLBACK_REPORT, interpret};
use crate::upstream::RawUpstreamResponse;

use common::HttpStatusCode;

use serde_json::json;

fn received(status: u16, body: serde_json::Value) -> RawUpstreamResponse {
    RawUpstreamResponse::Received {
        status: HttpStatusCode(status),
        body: body.to_string(),
    }
}

#[test]
fn given_transport_failure_when_interpreting_then_unreachable() {
    let raw = RawUpstreamResponse::Unreachable {
        message: String::from("operation timed out"),
        is_timeout: true,
        is_connection: false,
    };

    let result = interpret(raw);

    match result {
        Err(ReportError::UpstreamUnreachable { is_timeout, .. }) => assert!(is_timeout),
        other => panic!("expected UpstreamUnreachable, got {other:?}"),
    }
}

/// **VALUE**: Provider error text and status are carried through.
///
/// **BUG THIS CATCHES**: Would catch the status being replaced with 500 or the
/// provider's message being swapped for a generic one.
#[test]
fn given_429_with_message_when_interpreting_then_rejected_with_message() {
    let raw = received(429, json!({"error": {"message": "rate limited"}}));

    let err = interpret(raw).unwrap_err();

    assert_eq!(err.upstream_status(), Some(HttpStatusCode(429)));
    assert_eq!(err.client_message(), "rate limited");
    assert_eq!(err.error_category(), "upstream_client_error");
}

#[test]
fn given_rejection_without_message_when_interpreting_then_generic_message() {
    let no_message =
        interpret(received(500, json!({"error": {"code": "server_error"}}))).unwrap_err();
    let not_json = interpret(RawUpstreamResponse::Received {
        status: HttpStatusCode(502),
        body: String::from("<html>Bad Gateway</html>"),
    })
    .unwrap_err();

    assert_eq!(no_message.client_message(), GENERIC_REJECTION_MESSAGE);
    assert_eq!(not_json.client_message(), GENERIC_REJECTION_MESSAGE);
    assert_eq!(not_json.upstream_status(), Some(HttpStatusCode(502)));
}

#[test]
fn given_rejection_with_plain_error_string_when_interpreting_then_used() {
    let err = interpret(received(403, json!({"error": "project not allowed"}))).unwrap_err();

    assert_eq!(err.client_message(), "project not allowed");
}

/// **VALUE**: A 2xx with no choices is a success carrying the fallback text.
///
/// **WHY THIS MATTERS**: Callers rely on "a 200 always has a report". Turning
/// this into an error is a behavior regression.
#[test]
fn given_200_with_empty_choices_when_interpreting_then_fallback_success() {
    let report = interpret(received(200, json!({"choices": []}))).unwrap();

    assert_eq!(report.markdown(), FALLBACK_REPORT);
    assert!(report.is_fallback());
}

#[test]
fn given_200_with_malformed_shapes_when_interpreting_then_fallback_success() {
    let bodies = [
        json!({}),
        json!({"choices": [{}]}),
        json!({"choices": [{"message": {}}]}),
        json!({"choices": [{"message": {"content": null}}]}),
        json!({"choices": [{"message": {"content": 17}}]}),
        json!({"choices": [{"message": {"content": "   \n "}}]}),
        json!({"choices": "nope"}),
    ];

    for body in bodies {
        let report = interpret(received(200, body.clone())).unwrap();
        assert_eq!(report.markdown(), FALLBACK_REPORT, "body: {body}");
    }

    let not_json = interpret(RawUpstreamResponse::Received {
        status: HttpStatusCode(200),
        body: String::from("not json at all"),
    })
    .unwrap();
    assert_eq!(not_json.markdown(), FALLBACK_REPORT);
}

#[test]
fn given_200_with_content_when_interpreting_then_trimmed_report() {
    let raw = received(
        200,
        json!({"choices": [{"message": {"content": "  Report body  "}}]}),
    );

    let report = interpret(raw).unwrap();

    assert_eq!(report.markdown(), "Report body");
    assert!(!report.is_fallback());
}

#[test]
fn given_several_choices_when_interpreting_then_first_is_used() {
    let raw = received(
        200,
        json!({"choices": [
            {"message": {"role": "assistant", "content": "## Analysis\nfirst"}},
            {"message": {"role": "assistant", "content": "second"}}
        ]}),
    );

    assert_eq!(interpret(raw).unwrap().into_markdown(), "## Analysis\nfirst");
}

/// **VALUE**: Only the first choice decides the outcome.
///
/// **BUG THIS CATCHES**: Would catch the whole reply being deserialized
/// strictly, so one malformed later choice turns a usable first choice into
/// the fallback text.
#[test]
fn given_usable_first_choice_and_malformed_sibling_when_interpreting_then_first_content() {
    let raw = RawUpstreamResponse::Received {
        status: HttpStatusCode(200),
        body: String::from(
            r#"{"choices":[{"message":{"content":"  Real report  "}}, null, 42]}"#,
        ),
    };

    let report = interpret(raw).unwrap();

    assert_eq!(report.markdown(), "Real report");
    assert!(!report.is_fallback());
}
