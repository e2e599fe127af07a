//! Locating the JSON object a model embedded in its reply.
//!
//! The candidate is the greedy span from the first `{` to the last `}` in the
//! whole text. Replies holding several separate objects (or stray braces in
//! prose) therefore produce a combined span that usually fails to parse, and
//! the reply is read as plain text.

use serde_json::{Map, Value};

use crate::InterpretError;

/// The greedy `{ ... }` span, if the text has one.
pub fn candidate_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse the candidate span as a JSON object. Exactly one attempt is made.
pub fn extract_object(text: &str) -> Result<Map<String, Value>, InterpretError> {
    let span = candidate_span(text).ok_or(InterpretError::NoCandidate)?;
    Ok(serde_json::from_str(span)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn span_covers_nested_braces() {
        let text = r#"Sure! {"a": {"b": 1}} Done."#;
        assert_eq!(candidate_span(text), Some(r#"{"a": {"b": 1}}"#));
    }

    #[test]
    fn span_is_greedy_across_fragments() {
        let text = "first {1} then {2} end";
        assert_eq!(candidate_span(text), Some("{1} then {2}"));
    }

    #[test]
    fn no_span_without_braces() {
        assert_eq!(candidate_span("just words"), None);
        assert_eq!(candidate_span(""), None);
        assert_eq!(candidate_span("only { open"), None);
        assert_eq!(candidate_span("only } close"), None);
    }

    #[test]
    fn no_span_when_close_precedes_open() {
        assert_eq!(candidate_span("} backwards {"), None);
    }

    #[test]
    fn span_handles_multibyte_text() {
        let text = "Voilà → {\"title\": \"café\"} ✓";
        assert_eq!(candidate_span(text), Some("{\"title\": \"café\"}"));
    }

    #[test]
    fn extract_from_fenced_block() {
        let text = "```json\n{\"action\": \"create_task\"}\n```";
        let obj = extract_object(text).unwrap();
        assert_eq!(obj.get("action"), Some(&json!("create_task")));
    }

    #[test]
    fn extract_reports_missing_candidate() {
        assert!(matches!(extract_object("hello"), Err(InterpretError::NoCandidate)));
    }

    #[test]
    fn extract_reports_malformed_span() {
        let err = extract_object(r#"{"a": 1} and {"b": 2}"#).unwrap_err();
        assert!(matches!(err, InterpretError::Malformed(_)));
    }

    #[test]
    fn extract_rejects_prose_in_braces() {
        assert!(matches!(
            extract_object("use {curly braces} in prose"),
            Err(InterpretError::Malformed(_))
        ));
    }

    #[test]
    fn extract_empty_object() {
        assert!(extract_object("{}").unwrap().is_empty());
    }
}
