//! Card parser chaining unwrap, classification, extraction and assembly.

use tracing::{debug, info, warn};
use web_time::Instant;

use crate::error::ExtractionError;
use crate::models::card::BusinessCard;
use crate::models::config::ExtractionConfig;

use super::rules::{
    classify, map_json, parse_repaired, repair, unwrap_envelope, PlainTextExtractor,
    RecordAssembler, ResponseFormat, UNPARSABLE_JSON_PREFIX,
};
use super::CardExtractor;

/// Result of card extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted card.
    pub card: BusinessCard,
    /// Extraction path that produced the card.
    pub format: ResponseFormat,
    /// Model text after envelope unwrapping.
    pub unwrapped_text: String,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Business card parser.
#[derive(Debug, Clone, Default)]
pub struct CardParser {
    config: ExtractionConfig,
}

impl CardParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from an extraction config section.
    pub fn from_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Set echoed-surname stripping.
    pub fn with_surname_stripping(mut self, strip: bool) -> Self {
        self.config.strip_echoed_surname = strip;
        self
    }

    /// Set the `@egmail.com` correction.
    pub fn with_email_correction(mut self, correct: bool) -> Self {
        self.config.correct_email_typos = correct;
        self
    }

    /// Set brace balancing for truncated JSON.
    pub fn with_brace_balancing(mut self, balance: bool) -> Self {
        self.config.balance_braces = balance;
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    fn extract_json(&self, text: &str, warnings: &mut Vec<String>) -> BusinessCard {
        let repaired = repair(text, &self.config);
        let mut card = BusinessCard::new();

        match parse_repaired(&repaired) {
            Ok(value) => map_json(&value, &mut card),
            Err(e) => {
                warn!("Giving up on JSON response: {}", e);
                warnings.push(e.to_string());
                card.additional_info = Some(format!("{UNPARSABLE_JSON_PREFIX}{repaired}"));
            }
        }

        card
    }

    fn extract_plain_text(&self, text: &str, warnings: &mut Vec<String>) -> (ResponseFormat, BusinessCard) {
        let extractor = PlainTextExtractor::new().with_email_correction(self.config.correct_email_typos);
        let (table, card) = extractor.extract(text);
        debug!("Read {} labeled lines", table.len());

        // An object cut off before its closing brace fails the classifier.
        if table.is_empty() && text.trim_start().starts_with('{') {
            warnings.push("Response looks like truncated JSON".to_string());
            return (ResponseFormat::Json, self.extract_json(text, warnings));
        }

        (ResponseFormat::PlainText, card)
    }
}

impl CardExtractor for CardParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("Parsing card from {} characters of text", text.len());

        if text.trim().is_empty() {
            warnings.push(ExtractionError::EmptyInput.to_string());
            return ExtractionResult {
                card: BusinessCard::new(),
                format: ResponseFormat::PlainText,
                unwrapped_text: String::new(),
                warnings,
                processing_time_ms: start.elapsed().as_millis() as u64,
            };
        }

        let unwrapped = unwrap_envelope(text);

        let (format, card) = match classify(&unwrapped) {
            ResponseFormat::Json => (ResponseFormat::Json, self.extract_json(&unwrapped, &mut warnings)),
            ResponseFormat::PlainText => self.extract_plain_text(&unwrapped, &mut warnings),
        };

        let assembler = RecordAssembler::new().with_surname_stripping(self.config.strip_echoed_surname);
        let card = assembler.assemble(card, &unwrapped);

        if card.is_empty() {
            warnings.push("No card fields recognized".to_string());
        }

        debug!(
            "Extracted {} field(s) via {} path",
            card.present_fields().len(),
            format
        );

        ExtractionResult {
            card,
            format,
            unwrapped_text: unwrapped,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> BusinessCard {
        CardParser::new().extract(text)
    }

    #[test]
    fn test_plain_text_scenario() {
        let text = "Here are the extracted information:\n\
                    - Full name: Ada Lovelace\n\
                    - Titles: Mathematician\n\
                    - Phone: 555-1000\n\
                    - Email: ada@example.com\n";

        let expected = BusinessCard {
            name: Some("Ada Lovelace".to_string()),
            titles: Some("Mathematician".to_string()),
            phone: Some("555-1000".to_string()),
            emails: Some(vec!["ada@example.com".to_string()]),
            ..Default::default()
        };
        assert_eq!(parse(text), expected);
    }

    #[test]
    fn test_double_wrapped_json_scenario() {
        let text = r#"{"rawText": "{\"response\": \"{\\\"name\\\":\\\"Ada\\\",\\\"phone\\\":\\\"123\\\"}\"}"}"#;

        let result = CardParser::new().parse(text);
        assert_eq!(result.format, ResponseFormat::Json);
        assert_eq!(
            result.card,
            BusinessCard {
                name: Some("Ada".to_string()),
                phone: Some("123".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_truncated_json_scenario() {
        let result = CardParser::new().parse(r#"{"organization":"Acme""#);

        assert_eq!(result.format, ResponseFormat::Json);
        assert_eq!(
            result.card,
            BusinessCard {
                organization: Some("Acme".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_unrecognized_scenario() {
        let card = parse("not json at all {{{");

        assert!(card.is_empty());
        assert_eq!(
            card.additional_info.as_deref(),
            Some("Unrecognized response: not json at all {{{")
        );
    }

    #[test]
    fn test_unparsable_json_keeps_repaired_text() {
        let result = CardParser::new().parse(r#"{"name": "Ada", "phones": [1, 2}"#);

        assert!(result.card.is_empty());
        assert_eq!(
            result.card.additional_info.as_deref(),
            Some(r#"Unparsable JSON response: {"name": "Ada", "phones": [1, 2}"#)
        );
        assert!(result.warnings.iter().any(|w| w.contains("unparsable JSON")));
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        for text in ["", "   ", "\n\t\n"] {
            let result = CardParser::new().parse(text);
            assert_eq!(result.card, BusinessCard::new());
            assert_eq!(result.warnings, vec!["empty response text".to_string()]);
        }
    }

    #[test]
    fn test_surname_echo_removed_after_json_mapping() {
        let card = parse(r#"{"name": "Jane Doe", "surname": "Doe", "email": ["", "j@d.com"]}"#);

        assert_eq!(card.name.as_deref(), Some("Jane"));
        assert_eq!(card.surname.as_deref(), Some("Doe"));
        assert_eq!(card.emails, Some(vec!["j@d.com".to_string()]));
    }

    #[test]
    fn test_ollama_body_with_leading_zero_phone() {
        let inner = r#"{"card": {"full_name": "Fahri", "phone_number": 03243610001, "fax": {"phone_number": "03243610002"}"#;
        let body = serde_json::json!({ "model": "llama3.2", "response": inner, "done": true }).to_string();

        let card = parse(&body);
        assert_eq!(card.name.as_deref(), Some("Fahri"));
        assert_eq!(card.phone.as_deref(), Some("03243610001"));
        assert_eq!(card.fax.as_deref(), Some("03243610002"));
    }

    #[test]
    fn test_raw_text_wrapping_plain_text() {
        let body = serde_json::json!({ "rawText": "* Organization: Acme\n* Web: acme.test" }).to_string();
        let result = CardParser::new().parse(&body);

        assert_eq!(result.format, ResponseFormat::PlainText);
        assert_eq!(result.unwrapped_text, "* Organization: Acme\n* Web: acme.test");
        assert_eq!(result.card.web_address.as_deref(), Some("acme.test"));
    }

    #[test]
    fn test_switches_are_honored() {
        let parser = CardParser::new().with_surname_stripping(false).with_brace_balancing(false);

        let card = parser.extract("- Name: Jane Doe\n- Surname: Doe");
        assert_eq!(card.name.as_deref(), Some("Jane Doe"));

        let card = parser.extract(r#"{"organization":"Acme""#);
        assert!(card.organization.is_none());
        assert!(card.additional_info.is_some());
    }

    #[test]
    fn test_repeated_label_after_synonym_wins() {
        let card = CardParser::new().extract("- Phone: 111\n- Telefon: 222\n- Phone: 333");
        assert_eq!(card.phone.as_deref(), Some("333"));
    }
}
