//! Final cross-field cleanup of an extracted card.

use tracing::debug;

use crate::models::card::BusinessCard;

/// Prefix of `additionalInfo` when JSON could not be parsed after repair.
pub const UNPARSABLE_JSON_PREFIX: &str = "Unparsable JSON response: ";

/// Prefix of `additionalInfo` when nothing in the text was recognized.
pub const UNRECOGNIZED_PREFIX: &str = "Unrecognized response: ";

/// Record assembler.
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    strip_echoed_surname: bool,
}

impl RecordAssembler {
    pub fn new() -> Self {
        Self {
            strip_echoed_surname: true,
        }
    }

    /// Set whether a surname repeated at the end of the name is removed.
    pub fn with_surname_stripping(mut self, strip: bool) -> Self {
        self.strip_echoed_surname = strip;
        self
    }

    /// Apply cleanup rules and the diagnostic fallback.
    ///
    /// `source` is the unwrapped model text; it is kept in `additionalInfo`
    /// when no field could be extracted from it.
    pub fn assemble(&self, mut card: BusinessCard, source: &str) -> BusinessCard {
        if self.strip_echoed_surname {
            strip_echoed_surname(&mut card);
        }

        if card.is_empty() && card.additional_info.is_none() && !source.trim().is_empty() {
            card.additional_info = Some(format!("{UNRECOGNIZED_PREFIX}{source}"));
        }

        card
    }
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// `name = "Jane Doe", surname = "Doe"` becomes `name = "Jane"`.
pub fn strip_echoed_surname(card: &mut BusinessCard) {
    let (Some(name), Some(surname)) = (card.name.as_deref(), card.surname.as_deref()) else {
        return;
    };

    let Some(stripped) = strip_suffix_ignore_case(name.trim_end(), surname.trim()) else {
        return;
    };

    debug!("Removed echoed surname from name");
    let stripped = stripped.trim();
    card.name = (!stripped.is_empty()).then(|| stripped.to_string());
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let len = suffix.chars().count();
    if len == 0 {
        return None;
    }

    // Byte offset where the last `len` characters start.
    let start = text.char_indices().rev().nth(len - 1)?.0;
    let (head, tail) = text.split_at(start);

    (tail.to_lowercase() == suffix.to_lowercase()).then_some(head)
}
