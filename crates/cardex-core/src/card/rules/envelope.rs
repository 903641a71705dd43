//! Stripping of the JSON envelopes that carry the model's text.

use serde_json::Value;
use tracing::debug;

/// Outer envelope written by the raw endpoint.
pub const RAW_TEXT_KEY: &str = "rawText";

/// Inner envelope written by generate-style model APIs.
pub const RESPONSE_KEY: &str = "response";

/// Recover the model's own text from up to two layers of wrapping.
///
/// Each step is best effort: text that does not parse is left as it was.
pub fn unwrap_envelope(raw: &str) -> String {
    let mut text = raw.to_string();

    if let Some(Value::Object(map)) = parse_value(&text) {
        if let Some(Value::String(inner)) = map.get(RAW_TEXT_KEY) {
            debug!("Unwrapped {} envelope", RAW_TEXT_KEY);
            text = inner.clone();
        }
    }

    if let Some(Value::Object(map)) = parse_value(&text) {
        match map.get(RESPONSE_KEY) {
            Some(Value::String(inner)) => {
                debug!("Unwrapped {} envelope", RESPONSE_KEY);
                text = inner.clone();
            }
            // The model skipped the wrapper; the object itself is the payload.
            _ => text = text.trim().to_string(),
        }
    }

    text
}

fn parse_value(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_wrapped() {
        let raw = r#"{"rawText": "{\"response\": \"- Name: Ada\"}"}"#;
        assert_eq!(unwrap_envelope(raw), "- Name: Ada");
    }

    #[test]
    fn test_response_only() {
        let raw = r#"{"model":"llama3.2","response":"{\"name\":\"Ada\"}","done":true}"#;
        assert_eq!(unwrap_envelope(raw), r#"{"name":"Ada"}"#);
    }

    #[test]
    fn test_raw_text_holding_plain_text() {
        let raw = r#"{"rawText": "* Phone: 123"}"#;
        assert_eq!(unwrap_envelope(raw), "* Phone: 123");
    }

    #[test]
    fn test_object_without_response_is_kept() {
        let raw = "  {\"name\": \"Ada\", \"phone\": \"1\"}\n";
        assert_eq!(unwrap_envelope(raw), "{\"name\": \"Ada\", \"phone\": \"1\"}");
    }

    #[test]
    fn test_non_string_response_keeps_object() {
        let raw = r#"{"response": {"name": "Ada"}}"#;
        assert_eq!(unwrap_envelope(raw), raw);
    }

    #[test]
    fn test_invalid_json_unchanged() {
        assert_eq!(unwrap_envelope("{\"name\": \"Ada\""), "{\"name\": \"Ada\"");
        assert_eq!(unwrap_envelope("- Name: Ada"), "- Name: Ada");
        assert_eq!(unwrap_envelope(""), "");
    }

    #[test]
    fn test_non_object_json_unchanged() {
        assert_eq!(unwrap_envelope("[1, 2]"), "[1, 2]");
        assert_eq!(unwrap_envelope("\"text\""), "\"text\"");
    }
}
