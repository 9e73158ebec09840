//! Extraction of a [`LearningBundle`] from raw completion-provider output.
//!
//! Models are instructed to answer with JSON only, but in practice the
//! object often arrives wrapped in a fenced code block or surrounded by
//! commentary. [`extract`] tries, in order:
//!
//! 1. a triple-backtick fenced code block (optionally tagged `json`);
//! 2. the substring from the first `{` to the last `}` in the text.
//!
//! Whatever candidate is found must parse as JSON and pass full schema
//! validation — extraction is all-or-nothing, never a partial bundle.
//!
//! The brace-span fallback is intentionally naive: it can misparse when a
//! string value contains unbalanced braces or when multiple top-level
//! objects appear in the text. That limitation is part of the contract.

use serde_json::Value;
use thiserror::Error;

use super::LearningBundle;

// ---------------------------------------------------------------------------
// ParseError
// ---------------------------------------------------------------------------

/// Errors that can occur while recovering a bundle from provider output.
///
/// `NoJsonObject` and `MalformedJson` are distinct so logs can tell "the
/// model returned prose with no object at all" apart from "the object was
/// there but syntactically broken".
#[derive(Debug, Error)]
pub enum ParseError {
    /// Neither a fenced code block nor a `{`…`}` span was found.
    #[error("no JSON object found in response")]
    NoJsonObject,

    /// A candidate substring was found but is not valid JSON.
    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    /// The object is valid JSON but a required field is absent or has the
    /// wrong type.
    #[error("response is missing required field `{0}`")]
    MissingField(&'static str),

    /// A required prose field is present but empty.
    #[error("response field `{0}` is empty")]
    EmptyField(&'static str),

    /// A quiz entry violates the item invariant (options length ≥ 2,
    /// `correctAnswer` in range, string question/options/hint).
    #[error("invalid quiz item at index {index}: {reason}")]
    InvalidQuizItem { index: usize, reason: String },
}

// ---------------------------------------------------------------------------
// extract
// ---------------------------------------------------------------------------

/// Recover and validate a [`LearningBundle`] from raw provider output.
///
/// Pure and side-effect free — safe to call concurrently on independent
/// inputs. Performs no retry; a parse failure on an otherwise-successful
/// provider response is a hard error for the caller to surface.
///
/// # Example
/// ```rust
/// use speak_solve::content::extract;
///
/// let raw = r#"Sure! {"explanation": "E", "example": "X",
///     "quiz": [{"question": "Q?", "options": ["a", "b"],
///               "correctAnswer": 1, "hint": "H"}]} Hope that helps."#;
///
/// let bundle = extract(raw).unwrap();
/// assert_eq!(bundle.quiz.len(), 1);
/// ```
pub fn extract(raw: &str) -> Result<LearningBundle, ParseError> {
    let candidate = fenced_block(raw)
        .or_else(|| brace_span(raw))
        .ok_or(ParseError::NoJsonObject)?;

    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| ParseError::MalformedJson(e.to_string()))?;

    validate(&value)?;

    // Validation guarantees the shape matches the derive, so a failure here
    // is still reported as malformed rather than panicking.
    serde_json::from_value(value).map_err(|e| ParseError::MalformedJson(e.to_string()))
}

// ---------------------------------------------------------------------------
// Candidate location
// ---------------------------------------------------------------------------

/// Find the interior of the first triple-backtick fenced code block, if its
/// trimmed content looks like a JSON object.
fn fenced_block(raw: &str) -> Option<&str> {
    let open = raw.find("```")?;
    let mut body = &raw[open + 3..];

    // Optional `json` language tag directly after the opening fence.
    if let Some(rest) = body.strip_prefix("json") {
        body = rest;
    }

    let close = body.find("```")?;
    let inner = body[..close].trim();
    if inner.starts_with('{') {
        Some(inner)
    } else {
        None
    }
}

/// The substring from the first `{` to the last `}`, inclusive.
///
/// Tolerates commentary before and after the object. Knowingly confused by
/// unbalanced braces inside string values — see the module docs.
fn brace_span(raw: &str) -> Option<&str> {
    let first = raw.find('{')?;
    let last = raw.rfind('}')?;
    if last < first {
        return None;
    }
    Some(&raw[first..=last])
}

// ---------------------------------------------------------------------------
// Schema validation
// ---------------------------------------------------------------------------

/// Check required fields and the per-item quiz invariant.
///
/// Performed up front so an out-of-range `correctAnswer` can never reach
/// the quiz state machine.
fn validate(value: &Value) -> Result<(), ParseError> {
    require_prose(value, "explanation")?;
    require_prose(value, "example")?;

    let quiz = value
        .get("quiz")
        .and_then(Value::as_array)
        .ok_or(ParseError::MissingField("quiz"))?;

    for (index, item) in quiz.iter().enumerate() {
        validate_item(item, index)?;
    }

    Ok(())
}

/// Field must be present, a string, and non-empty after trimming.
fn require_prose(value: &Value, field: &'static str) -> Result<(), ParseError> {
    let text = value
        .get(field)
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingField(field))?;

    if text.trim().is_empty() {
        return Err(ParseError::EmptyField(field));
    }
    Ok(())
}

fn validate_item(item: &Value, index: usize) -> Result<(), ParseError> {
    let invalid = |reason: &str| ParseError::InvalidQuizItem {
        index,
        reason: reason.to_string(),
    };

    if item.get("question").and_then(Value::as_str).is_none() {
        return Err(invalid("missing question text"));
    }
    if item.get("hint").and_then(Value::as_str).is_none() {
        return Err(invalid("missing hint text"));
    }

    let options = item
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("missing options array"))?;

    if options.len() < 2 {
        return Err(invalid("fewer than 2 options"));
    }
    if options.iter().any(|o| !o.is_string()) {
        return Err(invalid("non-string option"));
    }

    let correct = item
        .get("correctAnswer")
        .and_then(Value::as_u64)
        .ok_or_else(|| invalid("missing correctAnswer index"))?;

    if correct as usize >= options.len() {
        return Err(invalid("correctAnswer out of range"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// A minimal valid bundle object as a JSON string.
    fn valid_json() -> String {
        r#"{
            "explanation": "Photosynthesis turns light into chemical energy.",
            "example": "A leaf in sunlight producing oxygen.",
            "quiz": [
                {
                    "question": "What does photosynthesis produce?",
                    "options": ["A) Oxygen", "B) Iron", "C) Salt", "D) Sand"],
                    "correctAnswer": 0,
                    "hint": "Think about what plants release."
                }
            ]
        }"#
        .to_string()
    }

    // -----------------------------------------------------------------------
    // Fenced code block path
    // -----------------------------------------------------------------------

    #[test]
    fn extracts_from_fenced_block_with_json_tag() {
        let raw = format!(
            "Sure! Here is your content:\n```json\n{}\n```\nEnjoy!",
            valid_json()
        );
        let bundle = extract(&raw).unwrap();
        assert_eq!(bundle.quiz.len(), 1);
        assert_eq!(bundle.quiz[0].correct_answer, 0);
    }

    #[test]
    fn extracts_from_fenced_block_without_tag() {
        let raw = format!("```\n{}\n```", valid_json());
        let bundle = extract(&raw).unwrap();
        assert!(bundle.explanation.contains("Photosynthesis"));
    }

    /// Round-trip: serialising a bundle and extracting it again yields the
    /// same value, even with arbitrary prose around the fence.
    #[test]
    fn fenced_round_trip_preserves_bundle() {
        let raw = format!("preamble\n```json\n{}\n```\ntrailer", valid_json());
        let first = extract(&raw).unwrap();

        let reserialized = serde_json::to_string(&first).unwrap();
        let again = extract(&format!("```json\n{reserialized}\n```")).unwrap();
        assert_eq!(first, again);
    }

    // -----------------------------------------------------------------------
    // Brace-span fallback path
    // -----------------------------------------------------------------------

    #[test]
    fn extracts_bare_object_with_surrounding_prose() {
        let raw = format!("Of course! {} Let me know!", valid_json());
        let bundle = extract(&raw).unwrap();
        assert_eq!(bundle.quiz[0].options.len(), 4);
    }

    #[test]
    fn extracts_object_with_no_surrounding_text() {
        let bundle = extract(&valid_json()).unwrap();
        assert_eq!(bundle.example, "A leaf in sunlight producing oxygen.");
    }

    /// A fence whose content is not an object falls through to the span
    /// search over the whole input.
    #[test]
    fn non_object_fence_falls_back_to_brace_span() {
        let raw = format!("```\nnot json here\n```\n{}", valid_json());
        assert!(extract(&raw).is_ok());
    }

    // -----------------------------------------------------------------------
    // Failure cases
    // -----------------------------------------------------------------------

    #[test]
    fn empty_input_is_no_json_object() {
        assert!(matches!(extract(""), Err(ParseError::NoJsonObject)));
    }

    #[test]
    fn prose_without_braces_is_no_json_object() {
        let err = extract("I could not generate a quiz for that topic.").unwrap_err();
        assert!(matches!(err, ParseError::NoJsonObject));
    }

    #[test]
    fn lone_open_brace_is_no_json_object() {
        // Only a `{` and no `}` — no candidate span exists.
        let err = extract("{\"explanation\": \"oops\"").unwrap_err();
        assert!(matches!(err, ParseError::NoJsonObject));
    }

    #[test]
    fn syntactically_invalid_candidate_is_malformed() {
        let err = extract("{not valid json}").unwrap_err();
        assert!(matches!(err, ParseError::MalformedJson(_)));
    }

    #[test]
    fn missing_explanation_is_rejected() {
        let raw = r#"{"example": "X", "quiz": []}"#;
        let err = extract(raw).unwrap_err();
        assert!(matches!(err, ParseError::MissingField("explanation")));
    }

    #[test]
    fn missing_example_is_rejected() {
        let raw = r#"{"explanation": "E", "quiz": []}"#;
        let err = extract(raw).unwrap_err();
        assert!(matches!(err, ParseError::MissingField("example")));
    }

    #[test]
    fn missing_quiz_is_rejected() {
        let raw = r#"{"explanation": "E", "example": "X"}"#;
        let err = extract(raw).unwrap_err();
        assert!(matches!(err, ParseError::MissingField("quiz")));
    }

    #[test]
    fn empty_explanation_is_rejected() {
        let raw = r#"{"explanation": "   ", "example": "X", "quiz": []}"#;
        let err = extract(raw).unwrap_err();
        assert!(matches!(err, ParseError::EmptyField("explanation")));
    }

    #[test]
    fn quiz_as_non_array_is_rejected() {
        let raw = r#"{"explanation": "E", "example": "X", "quiz": "none"}"#;
        let err = extract(raw).unwrap_err();
        assert!(matches!(err, ParseError::MissingField("quiz")));
    }

    // -----------------------------------------------------------------------
    // Quiz item invariant
    // -----------------------------------------------------------------------

    fn bundle_with_item(item: &str) -> String {
        format!(
            r#"{{"explanation": "E", "example": "X", "quiz": [{item}]}}"#
        )
    }

    #[test]
    fn last_option_index_is_accepted() {
        let raw = bundle_with_item(
            r#"{"question": "Q?", "options": ["a", "b", "c", "d"],
                "correctAnswer": 3, "hint": "H"}"#,
        );
        let bundle = extract(&raw).unwrap();
        assert_eq!(bundle.quiz[0].correct_answer, 3);
    }

    #[test]
    fn out_of_range_answer_is_rejected() {
        let raw = bundle_with_item(
            r#"{"question": "Q?", "options": ["a", "b", "c", "d"],
                "correctAnswer": 4, "hint": "H"}"#,
        );
        let err = extract(&raw).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidQuizItem { index: 0, .. }
        ));
    }

    #[test]
    fn single_option_is_rejected() {
        let raw = bundle_with_item(
            r#"{"question": "Q?", "options": ["only"], "correctAnswer": 0, "hint": "H"}"#,
        );
        assert!(matches!(
            extract(&raw).unwrap_err(),
            ParseError::InvalidQuizItem { .. }
        ));
    }

    #[test]
    fn missing_hint_is_rejected() {
        let raw = bundle_with_item(
            r#"{"question": "Q?", "options": ["a", "b"], "correctAnswer": 0}"#,
        );
        assert!(matches!(
            extract(&raw).unwrap_err(),
            ParseError::InvalidQuizItem { .. }
        ));
    }

    /// A single bad item fails the whole extraction — no partial bundles.
    #[test]
    fn one_bad_item_fails_everything() {
        let raw = r#"{
            "explanation": "E", "example": "X",
            "quiz": [
                {"question": "ok?", "options": ["a", "b"], "correctAnswer": 0, "hint": "h"},
                {"question": "bad?", "options": ["a", "b"], "correctAnswer": 9, "hint": "h"}
            ]
        }"#;
        let err = extract(raw).unwrap_err();
        assert!(matches!(err, ParseError::InvalidQuizItem { index: 1, .. }));
    }

    /// Documented limitation: a `}` inside a string value after the real
    /// object end extends the naive span and breaks the parse. This is the
    /// preserved behaviour, not a bug.
    #[test]
    fn trailing_brace_in_prose_breaks_span_search() {
        let raw = format!("{} and then I wrote }} by accident", valid_json());
        assert!(matches!(
            extract(&raw).unwrap_err(),
            ParseError::MalformedJson(_)
        ));
    }
}
