//! Best-effort structural repair of model-produced JSON.

use serde_json::Value;
use tracing::debug;

use super::patterns::UNQUOTED_PHONE_NUMBER;
use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;

/// Quote unquoted numeric values of `*phone_number` properties.
///
/// `"phone_number": 0324` is not valid JSON and `5551234` would lose its
/// formatting as a number, so both become strings.
pub fn quote_phone_numbers(text: &str) -> String {
    UNQUOTED_PHONE_NUMBER
        .replace_all(text, r#"${1}"${2}""#)
        .into_owned()
}

/// Append the closing braces a truncated object is missing.
///
/// Only runs when the text does not already parse. Excess closing braces,
/// brackets, commas and quotes are left alone.
pub fn balance_braces(text: &str) -> String {
    if serde_json::from_str::<Value>(text).is_ok() {
        return text.to_string();
    }

    let opens = text.matches('{').count();
    let closes = text.matches('}').count();

    if opens > closes {
        let missing = opens - closes;
        debug!("Appending {} closing brace(s)", missing);
        let mut repaired = String::with_capacity(text.len() + missing);
        repaired.push_str(text);
        repaired.extend(std::iter::repeat_n('}', missing));
        repaired
    } else {
        text.to_string()
    }
}

/// Apply the enabled repairs in order.
pub fn repair(text: &str, config: &ExtractionConfig) -> String {
    let mut repaired = text.to_string();
    if config.quote_phone_numbers {
        repaired = quote_phone_numbers(&repaired);
    }
    if config.balance_braces {
        repaired = balance_braces(&repaired);
    }
    repaired
}

/// Parse repaired text.
pub fn parse_repaired(repaired: &str) -> Result<Value, ExtractionError> {
    serde_json::from_str(repaired).map_err(|e| ExtractionError::UnparsableJson {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_quote_leading_zero_phone() {
        assert_eq!(
            quote_phone_numbers(r#"{"phone_number": 03243610001}"#),
            r#"{"phone_number": "03243610001"}"#
        );
        assert_eq!(
            quote_phone_numbers(r#"{"mobile_phone_number":5551234,"fax_phone_number" :12}"#),
            r#"{"mobile_phone_number":"5551234","fax_phone_number" :"12"}"#
        );
    }

    #[test]
    fn test_quote_leaves_strings_and_other_keys() {
        let text = r#"{"phone_number": "0324", "zip": 33343, "phone": 12}"#;
        assert_eq!(quote_phone_numbers(text), text);
    }

    #[test]
    fn test_balance_appends_exact_count() {
        assert_eq!(balance_braces(r#"{"organization":"Acme""#), r#"{"organization":"Acme"}"#);
        assert_eq!(
            balance_braces(r#"{"a": {"b": {"c": 1"#),
            r#"{"a": {"b": {"c": 1}}}"#
        );
    }

    #[test]
    fn test_balance_leaves_valid_and_over_closed_text() {
        assert_eq!(balance_braces(r#"{"a": 1}"#), r#"{"a": 1}"#);
        assert_eq!(balance_braces(r#"{"a": 1}}"#), r#"{"a": 1}}"#);
        assert_eq!(balance_braces("{{{"), "{{{}}}");
    }

    #[test]
    fn test_repair_then_parse() {
        let config = ExtractionConfig::default();
        let repaired = repair(r#"{"contact": {"phone_number": 0324"#, &config);
        assert_eq!(repaired, r#"{"contact": {"phone_number": "0324"}}"#);
        assert!(parse_repaired(&repaired).is_ok());
    }

    #[test]
    fn test_repair_respects_switches() {
        let config = ExtractionConfig {
            balance_braces: false,
            quote_phone_numbers: false,
            ..Default::default()
        };
        assert_eq!(repair(r#"{"phone_number": 0"#, &config), r#"{"phone_number": 0"#);
    }

    #[test]
    fn test_unrepairable_is_error() {
        let config = ExtractionConfig::default();
        let repaired = repair(r#"{"a": [1, 2}"#, &config);
        assert_eq!(repaired, r#"{"a": [1, 2}"#);

        let err = parse_repaired(&repaired).unwrap_err();
        assert!(matches!(err, ExtractionError::UnparsableJson { .. }));
    }
}
