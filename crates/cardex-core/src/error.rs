//! Error types for the cardex-core library.

use thiserror::Error;

/// Main error type for the cardex library.
#[derive(Error, Debug)]
pub enum CardexError {
    /// Card extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Model provider request or response error.
    #[error("provider error: {0}")]
    Provider(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised inside the extraction pipeline.
///
/// These never reach callers of [`crate::CardExtractor::parse`]; the parser turns
/// them into an `additionalInfo` diagnostic and a warning.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The JSON body could not be parsed even after repair.
    #[error("unparsable JSON after repair: {reason}")]
    UnparsableJson { reason: String },

    /// The response text was empty or whitespace only.
    #[error("empty response text")]
    EmptyInput,
}

/// Result type for the cardex library.
pub type Result<T> = std::result::Result<T, CardexError>;
