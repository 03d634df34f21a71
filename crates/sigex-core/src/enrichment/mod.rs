//! Optional tokenizer/entity enrichment used before the deterministic detectors.
//!
//! An [`EnrichmentSource`] proposes early `fs` and `data_path` candidates.
//! Every detector in [`crate::extraction`] works without one; sources are
//! injected by the caller and only read during extraction, so one instance
//! can be shared across threads behind an `Arc`.

mod doc;
mod lexical;
mod pass;

pub use doc::{Doc, Entity, EntityLabel, PatternKind, PatternMatch, Token};
pub use lexical::LexicalEnrichment;
pub use pass::enrich_record;

use crate::error::EnrichmentError;

/// A swappable tokenizer and entity recognizer.
pub trait EnrichmentSource: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Split text into tokens with byte offsets.
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, EnrichmentError>;

    /// Find entities over the given tokens.
    fn entities(&self, text: &str, tokens: &[Token]) -> Result<Vec<Entity>, EnrichmentError>;

    /// Find frequency and path token patterns, ordered by start token.
    fn match_patterns(
        &self,
        text: &str,
        tokens: &[Token],
    ) -> Result<Vec<PatternMatch>, EnrichmentError>;
}

/// Enrichment source that finds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

impl EnrichmentSource for NoEnrichment {
    fn name(&self) -> &str {
        "none"
    }

    fn tokenize(&self, _text: &str) -> Result<Vec<Token>, EnrichmentError> {
        Ok(Vec::new())
    }

    fn entities(&self, _text: &str, _tokens: &[Token]) -> Result<Vec<Entity>, EnrichmentError> {
        Ok(Vec::new())
    }

    fn match_patterns(
        &self,
        _text: &str,
        _tokens: &[Token],
    ) -> Result<Vec<PatternMatch>, EnrichmentError> {
        Ok(Vec::new())
    }
}
