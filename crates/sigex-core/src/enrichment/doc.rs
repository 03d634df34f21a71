//! Token/entity view of a text produced by an enrichment source.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::EnrichmentSource;
use crate::error::EnrichmentError;

/// A single token with byte offsets into the analyzed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Token text.
    pub text: String,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// Whether the token reads as a number (`1000`, `0.5`, `1,000`, `1/2`).
    pub like_num: bool,
}

impl Token {
    pub fn new(text: impl Into<String>, start: usize, end: usize, like_num: bool) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            like_num,
        }
    }

    /// Lower-cased token text.
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    /// Parse the token as a float.
    pub fn as_f64(&self) -> Option<f64> {
        self.text.parse().ok()
    }
}

/// Entity category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    /// Bare number.
    Cardinal,
    /// Number with a unit.
    Quantity,
    /// Percentage.
    Percent,
    /// File-system path.
    Path,
    /// Any other label a source may produce.
    Other(String),
}

impl EntityLabel {
    /// Numeric labels are inspected for sampling-rate candidates.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Cardinal | Self::Quantity | Self::Percent)
    }
}

/// An entity spanning tokens `start..end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

/// Token pattern kinds reported by [`EnrichmentSource::match_patterns`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Numeric token followed by a `hz`/`khz`/`mhz` token.
    FrequencyUnit,
    /// Single token such as `2048Hz`.
    AttachedFrequency,
    /// Windows path token with a data extension.
    WindowsPath,
    /// Unix path token with a data extension.
    UnixPath,
}

impl PatternKind {
    pub fn is_frequency(&self) -> bool {
        matches!(self, Self::FrequencyUnit | Self::AttachedFrequency)
    }

    pub fn is_path(&self) -> bool {
        matches!(self, Self::WindowsPath | Self::UnixPath)
    }
}

/// A pattern match spanning tokens `start..end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub kind: PatternKind,
    pub start: usize,
    pub end: usize,
}

/// Read-only analysis of one text.
#[derive(Debug, Clone, Default)]
pub struct Doc {
    text: String,
    tokens: Vec<Token>,
    entities: Vec<Entity>,
    matches: Vec<PatternMatch>,
}

impl Doc {
    /// Build a document from pre-computed parts.
    pub fn new(
        text: impl Into<String>,
        tokens: Vec<Token>,
        entities: Vec<Entity>,
        matches: Vec<PatternMatch>,
    ) -> Self {
        Self {
            text: text.into(),
            tokens,
            entities,
            matches,
        }
    }

    /// Run an enrichment source over `text`.
    ///
    /// Only a tokenization failure aborts the analysis. Entity or pattern
    /// failures leave the corresponding list empty so token-level
    /// fallbacks still run.
    pub fn analyze(source: &dyn EnrichmentSource, text: &str) -> Result<Self, EnrichmentError> {
        let tokens = source.tokenize(text)?;
        let entities = source.entities(text, &tokens).unwrap_or_else(|e| {
            debug!("{} entity recognition skipped: {}", source.name(), e);
            Vec::new()
        });
        let matches = source.match_patterns(text, &tokens).unwrap_or_else(|e| {
            debug!("{} pattern matching skipped: {}", source.name(), e);
            Vec::new()
        });

        Ok(Self::new(text, tokens, entities, matches))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn matches(&self) -> &[PatternMatch] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Original text covered by tokens `start..end`, clamped to the document.
    ///
    /// Returns an empty string for empty ranges or offsets that do not fall
    /// on character boundaries.
    pub fn span_text(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.tokens.len());
        if start >= end {
            return "";
        }
        let from = self.tokens[start].start;
        let to = self.tokens[end - 1].end;
        self.text.get(from..to).unwrap_or("")
    }

    /// Text of an entity.
    pub fn entity_text(&self, entity: &Entity) -> &str {
        self.span_text(entity.start, entity.end)
    }
}
