//! Rule-based field detectors for Methods text.
//!
//! Each module owns one or more record fields: the regex stage runs on the
//! raw (or dash-normalized) text, and token-level fallbacks run on an
//! enrichment [`Doc`](crate::enrichment::Doc) when one is available.

pub mod bandpass;
pub mod data_path;
pub mod filters;
pub mod methods;
pub mod params;
pub mod patterns;
pub mod sampling;

pub use bandpass::{bandpass_from_tokens, BandpassExtractor};
pub use data_path::{data_path_from_tokens, DataPathExtractor};
pub use filters::extract_filters;
pub use methods::detect_methods;
pub use params::{extract_params, nperseg_from_tokens};
pub use sampling::SamplingRateExtractor;

/// Trait for single-match field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<ExtractionMatch<Self::Output>>;
}

/// An extracted value with the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Source text that was matched.
    pub source: String,
    /// Byte range in the searched text.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            source: source.into(),
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Replace unicode en/em dashes with a plain hyphen.
pub fn normalize_dashes(text: &str) -> String {
    text.replace(['\u{2013}', '\u{2014}'], "-")
}
