//! Core library for business card extraction from language model output.
//!
//! This crate provides:
//! - Envelope unwrapping of `rawText` / `response` JSON wrappers
//! - Plain-text and JSON extraction paths sharing one synonym table
//! - Best-effort JSON repair (brace balancing, phone number quoting)
//! - Provider wire types for the model round trip

pub mod card;
pub mod error;
pub mod models;
pub mod provider;

pub use card::rules::ResponseFormat;
pub use card::{CardExtractor, CardParser, ExtractionResult};
pub use error::{CardexError, ExtractionError, Result};
pub use models::card::{BusinessCard, CanonicalField};
pub use models::config::{CardexConfig, ExtractionConfig, ProviderConfig, ProviderKind};

/// Extract a card with default settings. Never fails.
pub fn parse_card(text: &str) -> BusinessCard {
    CardParser::new().extract(text)
}
