//! Free-text guards applied to every string that comes back from the model.

use serde_json::Value;

/// Upper bound, in characters, for any sanitized string.
pub const MAX_TEXT_LEN: usize = 255;

/// Trims, replaces control characters and truncates a string to [`MAX_TEXT_LEN`] characters.
pub fn sanitize_str(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter_map(|c| match c {
            c if c.is_control() && c.is_whitespace() => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect();
    cleaned.trim().chars().take(MAX_TEXT_LEN).collect()
}

/// Sanitizes a JSON value; anything that is not a string becomes `""`.
pub fn sanitize_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => sanitize_str(s),
        _ => String::new(),
    }
}

/// Like [`sanitize_value`] but yields `None` for missing or blank input.
pub fn sanitize_optional(value: Option<&Value>) -> Option<String> {
    let cleaned = sanitize_value(value);
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Reads a number from a JSON value, accepting numeric strings such as `"30"`.
pub fn as_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Rounds to the nearest integer and clamps into `0..=u32::MAX`.
pub fn round_non_negative(value: f64) -> u32 {
    // Float-to-int casts saturate, so huge values land on u32::MAX.
    value.round().max(0.0) as u32
}
