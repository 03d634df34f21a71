//! Signal-processing parameter extraction from Methods text.

pub mod confidence;
mod parser;
pub mod rules;
pub mod units;

pub use confidence::compute_confidence;
pub use parser::{extract_parameters, MethodsExtractor};
pub use units::freq_to_hz;

use crate::models::record::ExtractionRecord;

/// Trait for Methods-text parameter extractors.
///
/// Extraction never fails: detectors that cannot produce a value leave
/// their field empty.
pub trait ParameterExtractor {
    /// Extract a scored record from free-form text.
    fn extract(&self, text: &str) -> ExtractionRecord;
}
