//! Extraction from bulleted or numbered `label: value` lists.

use tracing::debug;

use super::patterns::{EGMAIL_TYPO, LABELED_LINE_COLON, LABELED_LINE_DASH, PREAMBLE};
use super::synonyms::{normalize_label, resolve_label};
use crate::models::card::{BusinessCard, CanonicalField};

/// Labels and values read from the text, ordered by the line that last wrote them.
///
/// Labels are lower-cased; writing a label again moves it to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTable {
    entries: Vec<(String, String)>,
}

impl FieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a value. The label is normalized first.
    pub fn insert(&mut self, label: &str, value: impl Into<String>) {
        let label = normalize_label(label);
        self.entries.retain(|(l, _)| *l != label);
        self.entries.push((label, value.into()));
    }

    /// Case-insensitive lookup.
    pub fn get(&self, label: &str) -> Option<&str> {
        let label = normalize_label(label);
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }
}

/// Plain-text extractor.
#[derive(Debug, Clone)]
pub struct PlainTextExtractor {
    correct_email_typos: bool,
}

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self {
            correct_email_typos: true,
        }
    }

    /// Set the `@egmail.com` correction for hedged email values.
    pub fn with_email_correction(mut self, correct: bool) -> Self {
        self.correct_email_typos = correct;
        self
    }

    /// Read every recognizable `label: value` line into a table.
    pub fn extract_field_table(&self, text: &str) -> FieldTable {
        let mut table = FieldTable::new();

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if PREAMBLE.is_match(line) {
                continue;
            }

            let Some((label, value)) = split_labeled_line(line) else {
                continue;
            };

            let value = if resolve_label(&label) == Some(CanonicalField::Emails) {
                self.fix_email(value)
            } else {
                value
            };

            debug!("Parsed field -> key: {}, value: {}", label, value);
            table.insert(&label, value);
        }

        table
    }

    /// Write table entries into the card. Later entries for a field win.
    pub fn project(&self, table: &FieldTable, card: &mut BusinessCard) {
        for (label, value) in table.iter() {
            if let Some(field) = resolve_label(label) {
                card.set(field, value);
            }
        }
    }

    /// Extract straight into a fresh card.
    pub fn extract(&self, text: &str) -> (FieldTable, BusinessCard) {
        let table = self.extract_field_table(text);
        let mut card = BusinessCard::new();
        self.project(&table, &mut card);
        (table, card)
    }

    /// Undo the `@egmail.com` typo when the model flagged it with "assuming".
    fn fix_email(&self, value: String) -> String {
        if self.correct_email_typos && value.contains("assuming") {
            EGMAIL_TYPO.replace_all(&value, "@gmail.com").into_owned()
        } else {
            value
        }
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a marker line into (label, value); colon form first, then dash form.
fn split_labeled_line(line: &str) -> Option<(String, String)> {
    let caps = LABELED_LINE_COLON
        .captures(line)
        .or_else(|| LABELED_LINE_DASH.captures(line))?;

    let label = strip_emphasis(&caps[1]);
    let value = strip_emphasis(&caps[2]);

    if label.is_empty() || value.is_empty() {
        return None;
    }

    Some((label.to_string(), value.to_string()))
}

/// Drop markdown bold/italic asterisks and surrounding whitespace.
fn strip_emphasis(s: &str) -> &str {
    s.trim().trim_matches('*').trim()
}
