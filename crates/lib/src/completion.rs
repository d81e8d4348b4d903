//! # Completion Parser
//!
//! Language models wrap JSON in prose, markdown fences and trailing remarks.
//! This module recovers the object regardless of that noise; schema checks
//! happen later, during normalization.

use crate::errors::CompletionParseError;
use serde_json::{Map, Value};
use tracing::debug;

/// Returns the span from the first `{` to the last `}` in `text`, if any.
pub fn json_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parses the first JSON object embedded in a raw completion.
///
/// Fails with [`CompletionParseError::Format`] when no `{ ... }` span exists and
/// with [`CompletionParseError::Parse`] when the span is not valid JSON.
pub fn parse_completion(text: &str) -> Result<Map<String, Value>, CompletionParseError> {
    let span = json_object_span(text).ok_or(CompletionParseError::Format)?;
    match serde_json::from_str::<Value>(span) {
        Ok(Value::Object(object)) => Ok(object),
        // A span bounded by braces that parses cleanly is always an object.
        Ok(_) => Err(CompletionParseError::Format),
        Err(e) => {
            debug!(completion = %text, "Failed to parse completion JSON");
            Err(CompletionParseError::Parse(e))
        }
    }
}
