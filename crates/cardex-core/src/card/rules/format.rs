//! Dispatch between the JSON and plain-text extraction paths.

use serde::{Deserialize, Serialize};

/// Shape of the unwrapped model text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Looks like a JSON object.
    Json,
    /// Anything else.
    PlainText,
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseFormat::Json => write!(f, "json"),
            ResponseFormat::PlainText => write!(f, "plain_text"),
        }
    }
}

/// Classify text by its outer braces only. Validity is checked later by the JSON path.
pub fn classify(text: &str) -> ResponseFormat {
    let trimmed = text.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        ResponseFormat::Json
    } else {
        ResponseFormat::PlainText
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("  {\"a\": 1}\n"), ResponseFormat::Json);
        assert_eq!(classify("{ broken }"), ResponseFormat::Json);
        assert_eq!(classify("- Name: Ada"), ResponseFormat::PlainText);
        assert_eq!(classify("{\"organization\":\"Acme\""), ResponseFormat::PlainText);
        assert_eq!(classify(""), ResponseFormat::PlainText);
        assert_eq!(classify("{"), ResponseFormat::PlainText);
    }
}
