//! Gesture line parser.
//!
//! This module provides pure parsing functions for converting one line of the
//! device protocol into a validated [`GestureMessage`]:
//!
//! ```text
//! {"gesture":"pluck","value":127}
//! ```
//!
//! `value` is on the 0-127 scale and is normalized to `[0, 1]` here. Unknown
//! fields are ignored.

use crate::model::{normalize_raw_value, MalformedLine, ParseError};
use serde::Deserialize;
use serde_json::value::RawValue;

/// Raw JSON structure for deserializing a gesture line.
///
/// `value` is kept as source text: `serde_json` rejects numbers beyond the
/// `f64` range, but those still have to saturate like any other out-of-range
/// value.
#[derive(Debug, Deserialize)]
struct RawGestureMessage<'a> {
    #[serde(default)]
    gesture: Option<String>,
    #[serde(default, borrow)]
    value: Option<&'a RawValue>,
}

/// Read a JSON number as `f64`, overflowing to infinity.
fn number_value(raw: &RawValue) -> Result<f64, ParseError> {
    let text = raw.get().trim();
    // Only JSON numbers start with a digit or '-'
    let is_number = text.starts_with(|c: char| c == '-' || c.is_ascii_digit());
    match text.parse::<f64>() {
        Ok(value) if is_number => Ok(value),
        _ => Err(ParseError::InvalidJson {
            message: format!("invalid type for value: {}, expected a number", text),
        }),
    }
}

/// A device message, ready for registration.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureMessage {
    /// Gesture label as sent by the device (case preserved).
    pub gesture: String,
    /// Velocity normalized from the 0-127 `value` field and clamped to `[0, 1]`.
    pub velocity: f64,
}

/// Result of parsing a line with graceful error handling.
///
/// Lets the ingestor keep going after a bad line without an error path.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    /// Successfully parsed a gesture.
    Valid(GestureMessage),
    /// The line could not be interpreted.
    Malformed(MalformedLine),
}

/// Parse a single line into a [`GestureMessage`].
///
/// # Errors
///
/// Returns `ParseError` if:
/// - the line is not a JSON object, or `gesture`/`value` have the wrong type
/// - `gesture` is missing, `null`, or empty
pub fn parse_line(raw: &str) -> Result<GestureMessage, ParseError> {
    let message: RawGestureMessage =
        serde_json::from_str(raw).map_err(|e| ParseError::InvalidJson {
            message: e.to_string(),
        })?;

    let value = message.value.map(number_value).transpose()?;

    let gesture = message
        .gesture
        .filter(|g| !g.is_empty())
        .ok_or(ParseError::MissingGesture)?;

    Ok(GestureMessage {
        gesture,
        velocity: normalize_raw_value(value),
    })
}

/// Parse a single line gracefully.
///
/// Unlike [`parse_line`], this never returns an error. Failures become a
/// [`MalformedLine`] carrying the line number and raw text.
///
/// # Arguments
///
/// * `raw` - The trimmed line to parse
/// * `line_number` - Position of the line in the stream (1-indexed)
pub fn parse_line_graceful(raw: &str, line_number: usize) -> ParseResult {
    match parse_line(raw) {
        Ok(message) => ParseResult::Valid(message),
        Err(error) => ParseResult::Malformed(MalformedLine::new(line_number, raw, error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Valid Lines =====

    #[test]
    fn parse_line_full_velocity() {
        let message = parse_line(r#"{"gesture":"pluck","value":127}"#).unwrap();
        assert_eq!(message.gesture, "pluck");
        assert_eq!(message.velocity, 1.0);
    }

    #[test]
    fn parse_line_preserves_gesture_case() {
        let message = parse_line(r#"{"gesture":"Bow","value":0}"#).unwrap();
        assert_eq!(message.gesture, "Bow");
    }

    #[test]
    fn parse_line_normalizes_mid_value() {
        let message = parse_line(r#"{"gesture":"bow","value":64}"#).unwrap();
        assert!((message.velocity - 64.0 / 127.0).abs() < 1e-12);
    }

    #[test]
    fn parse_line_accepts_fractional_value() {
        let message = parse_line(r#"{"gesture":"bow","value":63.5}"#).unwrap();
        assert!((message.velocity - 0.5).abs() < 1e-12);
    }

    #[test]
    fn parse_line_missing_value_is_zero() {
        let message = parse_line(r#"{"gesture":"release"}"#).unwrap();
        assert_eq!(message.velocity, 0.0);
    }

    #[test]
    fn parse_line_null_value_is_zero() {
        let message = parse_line(r#"{"gesture":"release","value":null}"#).unwrap();
        assert_eq!(message.velocity, 0.0);
    }

    #[test]
    fn parse_line_clamps_over_range_value() {
        let message = parse_line(r#"{"gesture":"pluck","value":500}"#).unwrap();
        assert_eq!(message.velocity, 1.0);
    }

    #[test]
    fn parse_line_clamps_negative_value() {
        let message = parse_line(r#"{"gesture":"pluck","value":-40}"#).unwrap();
        assert_eq!(message.velocity, 0.0);
    }

    #[test]
    fn parse_line_clamps_value_beyond_f64_range() {
        let message = parse_line(r#"{"gesture":"pluck","value":1e400}"#).unwrap();
        assert_eq!(message.velocity, 1.0);
    }

    #[test]
    fn parse_line_clamps_negative_value_beyond_f64_range() {
        let message = parse_line(r#"{"gesture":"mute","value":-1e400}"#).unwrap();
        assert_eq!(message.velocity, 0.0);
    }

    #[test]
    fn parse_line_accepts_exponent_and_spacing() {
        let message = parse_line(r#"{ "gesture" : "bow" , "value" : 6.35e1 }"#).unwrap();
        assert!((message.velocity - 0.5).abs() < 1e-12);
    }

    #[test]
    fn parse_line_ignores_unknown_fields() {
        let message =
            parse_line(r#"{"gesture":"mute","value":10,"sensor":"piezo","ts":1234}"#).unwrap();
        assert_eq!(message.gesture, "mute");
    }

    // ===== Rejected Lines =====

    #[test]
    fn parse_line_rejects_non_json() {
        let result = parse_line("not json");
        assert!(matches!(result, Err(ParseError::InvalidJson { .. })));
    }

    #[test]
    fn parse_line_rejects_truncated_json() {
        let result = parse_line(r#"{"gesture":"bow","#);
        assert!(matches!(result, Err(ParseError::InvalidJson { .. })));
    }

    #[test]
    fn parse_line_rejects_missing_gesture() {
        assert_eq!(
            parse_line(r#"{"value":50}"#),
            Err(ParseError::MissingGesture)
        );
    }

    #[test]
    fn parse_line_rejects_null_gesture() {
        assert_eq!(
            parse_line(r#"{"gesture":null,"value":50}"#),
            Err(ParseError::MissingGesture)
        );
    }

    #[test]
    fn parse_line_rejects_empty_gesture() {
        assert_eq!(
            parse_line(r#"{"gesture":"","value":50}"#),
            Err(ParseError::MissingGesture)
        );
    }

    #[test]
    fn parse_line_rejects_numeric_gesture() {
        let result = parse_line(r#"{"gesture":5,"value":50}"#);
        assert!(matches!(result, Err(ParseError::InvalidJson { .. })));
    }

    #[test]
    fn parse_line_rejects_string_value() {
        let result = parse_line(r#"{"gesture":"bow","value":"64"}"#);
        assert!(matches!(result, Err(ParseError::InvalidJson { .. })));
    }

    #[test]
    fn parse_line_rejects_non_numeric_values() {
        for value in ["true", "[64]", "{\"v\":64}"] {
            let line = format!(r#"{{"gesture":"bow","value":{}}}"#, value);
            assert!(
                matches!(parse_line(&line), Err(ParseError::InvalidJson { .. })),
                "value {} should be rejected",
                value
            );
        }
    }

    #[test]
    fn parse_line_rejects_top_level_array() {
        let result = parse_line(r#"["pluck",127]"#);
        assert!(matches!(result, Err(ParseError::InvalidJson { .. })));
    }

    #[test]
    fn parse_line_rejects_json_null() {
        let result = parse_line("null");
        assert!(matches!(result, Err(ParseError::InvalidJson { .. })));
    }

    // ===== Graceful Parsing =====

    #[test]
    fn parse_line_graceful_returns_valid_for_correct_json() {
        match parse_line_graceful(r#"{"gesture":"scrape","value":0}"#, 1) {
            ParseResult::Valid(message) => assert_eq!(message.gesture, "scrape"),
            ParseResult::Malformed(_) => panic!("Expected Valid, got Malformed"),
        }
    }

    #[test]
    fn parse_line_graceful_preserves_line_number_and_raw_text() {
        match parse_line_graceful("garbage", 42) {
            ParseResult::Malformed(malformed) => {
                assert_eq!(malformed.line_number(), 42);
                assert_eq!(malformed.raw_line(), "garbage");
                assert!(matches!(
                    malformed.error(),
                    ParseError::InvalidJson { .. }
                ));
            }
            ParseResult::Valid(_) => panic!("Expected Malformed, got Valid"),
        }
    }

    #[test]
    fn parse_line_graceful_reports_missing_gesture() {
        match parse_line_graceful(r#"{"value":50}"#, 3) {
            ParseResult::Malformed(malformed) => {
                assert_eq!(malformed.error(), &ParseError::MissingGesture);
            }
            ParseResult::Valid(_) => panic!("Expected Malformed for missing gesture"),
        }
    }
}
