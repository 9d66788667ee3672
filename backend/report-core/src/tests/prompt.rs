// Unit tests for prompt construction
// The prompt is the only thing the model sees, so its content is the contract

use crate::prompt::{REFERENCE_RANGES, REPORT_SECTIONS, ROLE_DESCRIPTION, build_prompt};
use crate::reading::ReadingInput;

use serde_json::json;

fn sample_input() -> ReadingInput {
    let value = json!({
        "fc": 1.2,
        "ph": 7.8,
        "ta": 90,
        "cya": 60,
        "th": 250,
        "orp": 610,
        "phosphates": 300,
        "pool_volume": 45000
    });
    serde_json::from_value(value).unwrap()
}

/// **VALUE**: The readings appear verbatim, in the same form they are serialized.
///
/// **BUG THIS CATCHES**: Would catch readings being summarized, reordered
/// differently from the serializer, or dropped from the prompt.
#[test]
fn given_readings_when_building_prompt_then_serialized_input_embedded() {
    let input = sample_input();

    let prompt = build_prompt(&input);

    assert!(prompt.contains(&input.to_pretty_json()));
    assert!(prompt.contains("\"pool_volume\": 45000"));
}

/// **VALUE**: Each required section name appears exactly once.
///
/// **WHY THIS MATTERS**: Callers render the markdown by section; a prompt that
/// mentions a section twice invites the model to emit it twice.
#[test]
fn given_readings_when_building_prompt_then_each_section_named_once() {
    let prompt = build_prompt(&sample_input());

    for section in REPORT_SECTIONS {
        assert_eq!(
            prompt.matches(section).count(),
            1,
            "section '{section}' should appear exactly once"
        );
    }
}

#[test]
fn given_readings_when_building_prompt_then_role_and_ranges_present() {
    let prompt = build_prompt(&sample_input());

    assert!(prompt.starts_with(ROLE_DESCRIPTION));
    for range in REFERENCE_RANGES {
        assert!(prompt.contains(range.target), "missing target {}", range.target);
    }
    assert!(prompt.contains("markdown"));
    assert!(prompt.contains("pool_volume"));
}

/// **VALUE**: Same input, same text. No counters, no timestamps.
#[test]
fn given_same_input_when_building_twice_then_identical() {
    let input = sample_input();

    assert_eq!(build_prompt(&input), build_prompt(&input));
}

#[test]
fn given_empty_input_when_building_prompt_then_empty_object_embedded() {
    let prompt = build_prompt(&ReadingInput::default());

    assert!(prompt.contains("\n{}\n"));
}
