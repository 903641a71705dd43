//! Common regex patterns for business card extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Bulleted or numbered line with a colon separator: "- Phone: 555", "2. Email: a@b"
    pub static ref LABELED_LINE_COLON: Regex = Regex::new(
        r"^(?:[-*]|\d+\.)\s*([^:]+?)\s*:\s*(.*)$"
    ).unwrap();

    // Same markers with a dash separator: "* Phone - 555-1000"
    pub static ref LABELED_LINE_DASH: Regex = Regex::new(
        r"^(?:[-*]|\d+\.)\s*(.+?)\s+-\s+(.*)$"
    ).unwrap();

    // "Here are the extracted information:" and similar headers
    pub static ref PREAMBLE: Regex = Regex::new(
        r"(?i)^(?:here\s+(?:are|is)\b|(?:the\s+)?extracted\s+(?:information|details|fields)\b)"
    ).unwrap();

    // "phone_number": 0324...  (unquoted numeric value)
    pub static ref UNQUOTED_PHONE_NUMBER: Regex = Regex::new(
        r#"("[A-Za-z_]*phone_number"\s*:\s*)(\d+(?:\.\d+)?)"#
    ).unwrap();

    pub static ref EGMAIL_TYPO: Regex = Regex::new(
        r"(?i)@egmail\.com"
    ).unwrap();
}
