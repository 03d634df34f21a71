//! Passband range extraction (`1-40 Hz`, `0.5 to 30 Hz`, `1-2 kHz`).

use super::patterns::FREQ_RANGE;
use super::{ExtractionMatch, FieldExtractor};
use crate::enrichment::Doc;
use crate::models::record::Bandpass;

/// Frequency range extractor.
///
/// Expects dash-normalized text (see [`super::normalize_dashes`]).
pub struct BandpassExtractor;

impl BandpassExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BandpassExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for BandpassExtractor {
    type Output = Bandpass;

    fn extract(&self, text: &str) -> Option<ExtractionMatch<Bandpass>> {
        let caps = FREQ_RANGE.captures(text)?;
        let low: f64 = caps[1].parse().ok()?;
        let high: f64 = caps[2].parse().ok()?;

        let scale = match caps.get(3).map(|u| u.as_str().to_lowercase()).as_deref() {
            Some("khz") => 1_000.0,
            Some("mhz") => 1_000_000.0,
            _ => 1.0,
        };

        let full = caps.get(0)?;
        Some(
            ExtractionMatch::new(Bandpass::new(low * scale, high * scale), full.as_str())
                .with_position(full.start(), full.end()),
        )
    }
}

/// Token fallback: `NUM (to|-) NUM Hz...` with bare values and no unit scaling.
pub fn bandpass_from_tokens(doc: &Doc) -> Option<Bandpass> {
    let tokens = doc.tokens();

    for i in 0..tokens.len().saturating_sub(2) {
        let separator = tokens[i + 1].lower();
        if !tokens[i].like_num || !(separator == "to" || separator == "-") || !tokens[i + 2].like_num
        {
            continue;
        }

        let Some(unit) = tokens.get(i + 3) else {
            continue;
        };
        if !unit.lower().starts_with("hz") {
            continue;
        }

        if let (Some(low), Some(high)) = (tokens[i].as_f64(), tokens[i + 2].as_f64()) {
            return Some(Bandpass::new(low, high));
        }
    }

    None
}

/// Detect the passband: regex first, token fallback only when it misses.
pub fn detect_bandpass(text: &str, doc: Option<&Doc>) -> Option<Bandpass> {
    BandpassExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .or_else(|| doc.and_then(bandpass_from_tokens))
}
