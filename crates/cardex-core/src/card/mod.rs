//! Business card extraction module.

mod parser;
pub mod rules;

pub use parser::{CardParser, ExtractionResult};

use crate::models::card::BusinessCard;

/// Trait for business card extractors.
///
/// Extraction never fails: degraded input yields a card whose
/// `additionalInfo` carries the raw text.
pub trait CardExtractor {
    /// Extract a card together with extraction metadata.
    fn parse(&self, text: &str) -> ExtractionResult;

    /// Extract just the card.
    fn extract(&self, text: &str) -> BusinessCard {
        self.parse(text).card
    }
}
