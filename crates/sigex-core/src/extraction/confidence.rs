//! Record-level confidence scoring.

use crate::models::record::ExtractionRecord;

/// Weight for a detected sampling rate.
pub const FS_WEIGHT: f64 = 0.30;
/// Weight for a detected data path.
pub const DATA_PATH_WEIGHT: f64 = 0.25;
/// Weight for at least one detected method.
pub const METHODS_WEIGHT: f64 = 0.20;
/// Weight for a detected passband.
pub const BANDPASS_WEIGHT: f64 = 0.15;
/// Weight for at least one filter hint.
pub const FILTERS_WEIGHT: f64 = 0.10;

/// Score a record from field presence, clamped to 1.0 and rounded to 3 decimals.
///
/// Field values never matter, only whether they are set.
pub fn compute_confidence(record: &ExtractionRecord) -> f64 {
    let mut score = 0.0;

    if record.fs.is_some() {
        score += FS_WEIGHT;
    }
    if record.data_path.is_some() {
        score += DATA_PATH_WEIGHT;
    }
    if !record.methods.is_empty() {
        score += METHODS_WEIGHT;
    }
    if record.bandpass.is_some() {
        score += BANDPASS_WEIGHT;
    }
    if !record.filters.is_empty() {
        score += FILTERS_WEIGHT;
    }

    let score: f64 = score.min(1.0);
    (score * 1000.0).round() / 1000.0
}

impl ExtractionRecord {
    /// Recompute the confidence score from the current fields.
    pub fn compute_confidence(&self) -> f64 {
        compute_confidence(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{Bandpass, FilterHint, Method};

    fn full_record() -> ExtractionRecord {
        ExtractionRecord {
            methods: vec![Method::Welch],
            bandpass: Some(Bandpass::new(1.0, 40.0)),
            filters: vec![FilterHint::Lowpass { cutoff: 40.0 }],
            data_path: Some("a.fif".to_string()),
            fs: Some(1.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_record_scores_zero() {
        assert_eq!(compute_confidence(&ExtractionRecord::default()), 0.0);
    }

    #[test]
    fn test_partial_scores() {
        let record = ExtractionRecord {
            fs: Some(1000.0),
            ..Default::default()
        };
        assert_eq!(compute_confidence(&record), 0.3);

        let record = ExtractionRecord {
            fs: Some(1000.0),
            data_path: Some("a.fif".to_string()),
            ..Default::default()
        };
        assert_eq!(compute_confidence(&record), 0.55);
    }

    #[test]
    fn test_all_fields_clamped_to_one() {
        assert_eq!(compute_confidence(&full_record()), 1.0);
    }

    #[test]
    fn test_params_do_not_contribute() {
        let mut record = ExtractionRecord::default();
        record.params.nperseg = Some(256);
        record.params.window = Some("hann".to_string());
        assert_eq!(compute_confidence(&record), 0.0);
    }

    #[test]
    fn test_zero_sampling_rate_still_counts() {
        let record = ExtractionRecord {
            fs: Some(0.0),
            ..Default::default()
        };
        assert_eq!(record.compute_confidence(), 0.3);
    }
}
