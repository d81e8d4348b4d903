//! # Completion Parser Tests
//!
//! Checks that the JSON object is recovered from the kinds of noise models put
//! around it, and that the two failure modes stay distinguishable.

use serde_json::json;
use vitalog::completion::{json_object_span, parse_completion};
use vitalog::errors::CompletionParseError;

/// Tests that the same object is recovered with or without surrounding prose and fences.
#[test]
fn test_recovers_object_from_noise() {
    let bare = r#"{"foodEntries": [], "workouts": [{"name": "Yoga"}], "habits": []}"#;
    let noisy = format!(
        "Sure! Here's what I found:\n```json\n{bare}\n```\nLet me know if you need anything else."
    );

    let expected = parse_completion(bare).expect("bare object should parse");
    let recovered = parse_completion(&noisy).expect("fenced object should parse");

    assert_eq!(expected, recovered);
    assert_eq!(recovered["workouts"][0]["name"], json!("Yoga"));
}

/// Tests that nested objects are kept whole by spanning to the last closing brace.
#[test]
fn test_span_covers_nested_objects() {
    let text = r#"Result: {"a": {"b": {"c": 1}}} done"#;
    assert_eq!(json_object_span(text), Some(r#"{"a": {"b": {"c": 1}}}"#));
}

/// Tests that a response without any braces is a format error.
#[test]
fn test_missing_object_is_format_error() {
    let err = parse_completion("I could not find any health data.").unwrap_err();
    assert!(matches!(err, CompletionParseError::Format));

    // A closing brace before the opening one is not a span either.
    let err = parse_completion("} nothing here {").unwrap_err();
    assert!(matches!(err, CompletionParseError::Format));
}

/// Tests that a broken span is a parse error, not a format error.
#[test]
fn test_invalid_json_is_parse_error() {
    // Truncated output: the span ends at the inner object's brace.
    let err = parse_completion(r#"{"foodEntries": [ {"name": "toast"} "#).unwrap_err();
    assert!(matches!(err, CompletionParseError::Parse(_)));

    let err = parse_completion(r#"{"foodEntries": [ {"name": "toast",, } ]}"#).unwrap_err();
    assert!(matches!(err, CompletionParseError::Parse(_)));
}

/// Tests that two objects in one response collapse into one invalid span.
#[test]
fn test_two_objects_fail_to_parse() {
    let err = parse_completion(r#"{"a": 1} and also {"b": 2}"#).unwrap_err();
    assert!(matches!(err, CompletionParseError::Parse(_)));
}
