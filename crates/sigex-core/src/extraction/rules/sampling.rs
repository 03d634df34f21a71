//! Sampling rate (`fs`) extraction stages.
//!
//! The stages are independent here; their precedence lives in the parser.

use regex::Regex;

use super::patterns::{FS_ASSIGNMENT, NUMBER_HZ, SAMPLING_RATE_PHRASE, SAMPLING_TOKENS};
use super::{ExtractionMatch, FieldExtractor};
use crate::enrichment::Doc;
use crate::extraction::units::freq_to_hz;

/// Substrings that mark a bare `NUM Hz` as a sampling rate. Case-sensitive.
const CONTEXT_KEYWORDS: [&str; 5] = ["sampling", "sampled", "downsampl", "fs", "sampling rate"];

/// Characters inspected on each side of a bare `NUM Hz` match.
const CONTEXT_CHARS: usize = 40;

/// Sampling rate extractor for the explicit `fs = ...` and
/// `sampling rate (is|was) ...` phrasings.
pub struct SamplingRateExtractor;

impl SamplingRateExtractor {
    pub fn new() -> Self {
        Self
    }

    fn unit_aware(pattern: &Regex, text: &str) -> Option<ExtractionMatch<f64>> {
        let caps = pattern.captures(text)?;
        let literal = caps.get(1)?;
        let hz = freq_to_hz(literal.as_str()).ok()?;
        Some(ExtractionMatch::new(hz, literal.as_str()).with_position(literal.start(), literal.end()))
    }

    /// `fs=1000`, `fs: 1 kHz`, `fs 250Hz`.
    pub fn extract_assignment(&self, text: &str) -> Option<ExtractionMatch<f64>> {
        Self::unit_aware(&FS_ASSIGNMENT, text)
    }

    /// `sampling rate was 2048Hz`, `sampling rate 1 kHz`.
    pub fn extract_phrase(&self, text: &str) -> Option<ExtractionMatch<f64>> {
        Self::unit_aware(&SAMPLING_RATE_PHRASE, text)
    }

    /// First bare `NUM Hz` whose surrounding 40 characters mention sampling.
    ///
    /// Only the first `NUM Hz` occurrence in the text is considered.
    pub fn extract_hz_near_keyword(&self, text: &str) -> Option<ExtractionMatch<f64>> {
        let m = NUMBER_HZ.find(text)?;
        let context = context_window(text, m.start(), m.end(), CONTEXT_CHARS);
        if !CONTEXT_KEYWORDS.iter().any(|k| context.contains(k)) {
            return None;
        }
        let hz = freq_to_hz(m.as_str()).ok()?;
        Some(ExtractionMatch::new(hz, m.as_str()).with_position(m.start(), m.end()))
    }
}

impl Default for SamplingRateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for SamplingRateExtractor {
    type Output = f64;

    fn extract(&self, text: &str) -> Option<ExtractionMatch<f64>> {
        self.extract_assignment(text)
            .or_else(|| self.extract_phrase(text))
    }
}

/// Token fallback: literal `fs` followed by a numeric token (bare value).
pub fn fs_from_tokens(doc: &Doc) -> Option<f64> {
    doc.tokens()
        .windows(2)
        .filter(|pair| pair[0].lower() == "fs" && pair[1].like_num)
        .find_map(|pair| pair[1].as_f64())
}

/// Token fallback: numeric token followed by `hz` with a sampling keyword
/// among the 4 preceding tokens (bare value).
pub fn hz_token_near_keyword(doc: &Doc) -> Option<f64> {
    let tokens = doc.tokens();

    for i in 0..tokens.len().saturating_sub(2) {
        if !tokens[i].like_num || !matches!(tokens[i + 1].lower().as_str(), "hz" | "hz." | "hz,") {
            continue;
        }
        let left = &tokens[i.saturating_sub(4)..i];
        if !left
            .iter()
            .any(|t| SAMPLING_TOKENS.contains(&t.lower().as_str()))
        {
            continue;
        }
        if let Some(value) = tokens[i].as_f64() {
            return Some(value);
        }
    }

    None
}

/// Slice of `text` covering up to `chars` characters on either side of `start..end`.
fn context_window(text: &str, start: usize, end: usize, chars: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(chars)
        .last()
        .map_or(start, |(i, _)| i);
    let to = text[end..]
        .char_indices()
        .nth(chars)
        .map_or(text.len(), |(i, _)| end + i);
    &text[from..to]
}
