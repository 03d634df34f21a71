//! Error types for the sigex-core library.

use thiserror::Error;

/// Main error type for the sigex library.
#[derive(Error, Debug)]
pub enum SigexError {
    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Enrichment source error.
    #[error("enrichment error: {0}")]
    Enrichment(#[from] EnrichmentError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to parameter field extraction.
///
/// These never escape [`crate::ParameterExtractor::extract`]; detectors treat
/// them as "field not found".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// A frequency literal had no numeric part left after unit stripping.
    #[error("no numeric value in frequency literal {value:?}")]
    UnitParse { value: String },

    /// A count-valued parameter did not fit its integer type.
    #[error("failed to parse {field}: {value}")]
    NumberParse { field: String, value: String },
}

/// Errors raised by an enrichment source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnrichmentError {
    /// Tokenization failed.
    #[error("tokenization failed: {0}")]
    Tokenize(String),

    /// Entity recognition failed.
    #[error("entity recognition failed: {0}")]
    Entities(String),

    /// Token pattern matching failed.
    #[error("pattern matching failed: {0}")]
    Patterns(String),
}

/// Result type for the sigex library.
pub type Result<T> = std::result::Result<T, SigexError>;
