//! WASM bindings for business card extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use cardex_core::card::rules;
use cardex_core::{BusinessCard, CardExtractor as _, CardParser, ResponseFormat};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract a business card from model output with default settings.
///
/// Never throws on bad input; unrecognized text comes back in `additionalInfo`.
#[wasm_bindgen]
pub fn extract_card(text: &str) -> Result<JsValue, JsValue> {
    to_js(&cardex_core::parse_card(text))
}

/// Report which extraction path the text would take: `json` or `plain_text`.
#[wasm_bindgen]
pub fn detect_format(text: &str) -> String {
    rules::classify(&rules::unwrap_envelope(text)).to_string()
}

/// Strip `rawText` / `response` wrappers from model output.
#[wasm_bindgen]
pub fn unwrap_envelope(text: &str) -> String {
    rules::unwrap_envelope(text)
}

/// Card extractor class for browser use.
#[wasm_bindgen]
pub struct CardExtractor {
    parser: CardParser,
    log_warnings: bool,
}

#[wasm_bindgen]
impl CardExtractor {
    /// Create a new card extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: CardParser::new(),
            log_warnings: false,
        }
    }

    /// Configure stripping of a surname echoed at the end of the name.
    #[wasm_bindgen]
    pub fn set_strip_surname(&mut self, strip: bool) {
        self.parser = self.parser.clone().with_surname_stripping(strip);
    }

    /// Configure the `@egmail.com` correction.
    #[wasm_bindgen]
    pub fn set_correct_email_typos(&mut self, correct: bool) {
        self.parser = self.parser.clone().with_email_correction(correct);
    }

    /// Echo extraction warnings to the browser console.
    #[wasm_bindgen]
    pub fn set_log_warnings(&mut self, log: bool) {
        self.log_warnings = log;
    }

    /// Extract card from model output.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse(text);
        self.log(&result.warnings);
        to_js(&result.card)
    }

    /// Get extraction result with metadata.
    #[wasm_bindgen]
    pub fn extract_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse(text);
        self.log(&result.warnings);

        #[derive(Serialize)]
        struct ExtractResult {
            card: BusinessCard,
            format: ResponseFormat,
            unwrapped_text: String,
            warnings: Vec<String>,
            processing_time_ms: u64,
        }

        to_js(&ExtractResult {
            card: result.card,
            format: result.format,
            unwrapped_text: result.unwrapped_text,
            warnings: result.warnings,
            processing_time_ms: result.processing_time_ms,
        })
    }

    fn log(&self, warnings: &[String]) {
        if !self.log_warnings {
            return;
        }
        for warning in warnings {
            web_sys::console::warn_1(&JsValue::from_str(warning));
        }
    }
}

impl Default for CardExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_detect_format() {
        assert_eq!(detect_format(r#"{"name":"Ada"}"#), "json");
        assert_eq!(detect_format("- Name: Ada"), "plain_text");
        assert_eq!(detect_format(r#"{"response":"- Name: Ada"}"#), "plain_text");
    }

    #[wasm_bindgen_test]
    fn test_unwrap_envelope() {
        assert_eq!(unwrap_envelope(r#"{"rawText":"- Name: Ada"}"#), "- Name: Ada");
    }

    #[wasm_bindgen_test]
    fn test_extraction_runs_in_browser() {
        let result = cardex_core::CardExtractor::parse(
            &CardParser::new(),
            "- Full name: Ada Lovelace\n- Phone: 555-1000",
        );
        assert_eq!(result.card.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(result.card.phone.as_deref(), Some("555-1000"));

        assert!(CardExtractor::new().extract("- Name: Ada").is_ok());
        assert!(extract_card("not json at all {{{").is_ok());
    }

    #[wasm_bindgen_test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
