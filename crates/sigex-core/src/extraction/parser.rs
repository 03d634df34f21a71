//! Extraction record assembly: enrichment pass, field detectors, scoring.

use std::sync::Arc;

use tracing::{debug, info};

use crate::enrichment::{enrich_record, Doc, EnrichmentSource, LexicalEnrichment};
use crate::models::config::{EnrichmentMode, ExtractionConfig};
use crate::models::record::ExtractionRecord;

use super::rules::{
    bandpass::detect_bandpass,
    data_path::data_path_from_tokens,
    detect_methods, extract_filters, extract_params, normalize_dashes,
    sampling::{fs_from_tokens, hz_token_near_keyword},
    DataPathExtractor, FieldExtractor, SamplingRateExtractor,
};
use super::ParameterExtractor;

/// Rule-based extractor with an optional enrichment source.
///
/// The source is only read during extraction, so one extractor can be
/// cloned or shared across threads.
#[derive(Clone, Default)]
pub struct MethodsExtractor {
    enrichment: Option<Arc<dyn EnrichmentSource>>,
}

impl MethodsExtractor {
    /// Create an extractor without enrichment.
    pub fn new() -> Self {
        Self { enrichment: None }
    }

    /// Use `source` for the enrichment pass and token fallbacks.
    pub fn with_enrichment(mut self, source: Arc<dyn EnrichmentSource>) -> Self {
        self.enrichment = Some(source);
        self
    }

    /// Build an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        match config.enrichment {
            EnrichmentMode::None => Self::new(),
            EnrichmentMode::Lexical => Self::new().with_enrichment(Arc::new(LexicalEnrichment::new())),
        }
    }

    /// Name of the configured enrichment source, if any.
    pub fn enrichment_name(&self) -> Option<&str> {
        self.enrichment.as_deref().map(|source| source.name())
    }

    fn analyze(&self, text: &str) -> Option<Doc> {
        let source = self.enrichment.as_deref()?;
        match Doc::analyze(source, text) {
            Ok(doc) => Some(doc),
            Err(e) => {
                debug!("Enrichment source '{}' failed: {}", source.name(), e);
                None
            }
        }
    }

    fn detect_data_path(&self, text: &str, doc: Option<&Doc>, record: &mut ExtractionRecord) {
        if let Some(m) = DataPathExtractor::new().extract(text) {
            debug!("data_path from text: {:?}", m.source);
            record.data_path = Some(m.value);
        } else if record.data_path.is_none() {
            if let Some(path) = doc.and_then(data_path_from_tokens) {
                debug!("data_path from tokens: {}", path);
                record.data_path = Some(path);
            }
        }
    }

    /// Sampling rate cascade. The explicit forms overwrite earlier
    /// candidates; the looser ones only fill an empty slot.
    fn detect_fs(&self, text: &str, doc: Option<&Doc>, record: &mut ExtractionRecord) {
        let sampling = SamplingRateExtractor::new();

        if let Some(m) = sampling.extract_assignment(text) {
            debug!("fs {} from assignment {:?}", m.value, m.source);
            record.fs = Some(m.value);
        } else if let Some(m) = sampling.extract_phrase(text) {
            debug!("fs {} from sampling rate phrase {:?}", m.value, m.source);
            record.fs = Some(m.value);
        } else {
            if record.fs.is_none() {
                record.fs = doc.and_then(fs_from_tokens);
            }
            if record.fs.is_none() {
                if let Some(m) = sampling.extract_hz_near_keyword(text) {
                    debug!("fs {} from Hz near sampling keyword", m.value);
                    record.fs = Some(m.value);
                }
            }
        }

        if record.fs.is_none() {
            record.fs = doc.and_then(hz_token_near_keyword);
        }
    }
}

impl std::fmt::Debug for MethodsExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodsExtractor")
            .field("enrichment", &self.enrichment_name())
            .finish()
    }
}

impl ParameterExtractor for MethodsExtractor {
    fn extract(&self, text: &str) -> ExtractionRecord {
        if text.is_empty() {
            return ExtractionRecord::default();
        }

        let normalized = normalize_dashes(text);
        let doc = self.analyze(text);
        let mut record = ExtractionRecord::default();

        if let Some(doc) = &doc {
            enrich_record(doc, &mut record);
            debug!(
                "Enrichment candidates: fs={:?}, data_path={:?}",
                record.fs, record.data_path
            );
        }

        for method in detect_methods(&normalized) {
            record.push_method(method);
        }

        record.params = extract_params(text, doc.as_ref());
        record.bandpass = detect_bandpass(&normalized, doc.as_ref());
        record.filters = extract_filters(text);

        self.detect_data_path(text, doc.as_ref(), &mut record);
        self.detect_fs(&normalized, doc.as_ref(), &mut record);

        record.confidence = record.compute_confidence();

        info!(
            "Extracted {} method(s), fs={:?}, confidence {:.3}",
            record.methods.len(),
            record.fs,
            record.confidence
        );

        record
    }
}

/// Extract parameters from `text` without enrichment.
pub fn extract_parameters(text: &str) -> ExtractionRecord {
    MethodsExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnrichmentError;
    use crate::enrichment::{Entity, PatternMatch, Token};
    use crate::models::record::{Bandpass, FilterHint, Method};
    use pretty_assertions::assert_eq;

    struct FailingSource;

    impl EnrichmentSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        fn tokenize(&self, _text: &str) -> Result<Vec<Token>, EnrichmentError> {
            Err(EnrichmentError::Tokenize("model not loaded".to_string()))
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

    fn lexical() -> MethodsExtractor {
        MethodsExtractor::new().with_enrichment(Arc::new(LexicalEnrichment::new()))
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(extract_parameters(""), ExtractionRecord::default());
        assert_eq!(lexical().extract("").confidence, 0.0);
    }

    #[test]
    fn test_full_record() {
        let text = "Data were recorded at fs = 1 kHz and stored in data/subject1/session1.csv. \
                    We applied a 4th-order Butterworth filter with a bandpass of 1-40 Hz and \
                    computed PSDs using Welch's method (nperseg=2048, window=hann).";
        let record = extract_parameters(text);

        assert_eq!(record.fs, Some(1000.0));
        assert_eq!(record.data_path.as_deref(), Some("data/subject1/session1.csv"));
        assert_eq!(record.methods, vec![Method::Welch]);
        assert_eq!(record.bandpass, Some(Bandpass::new(1.0, 40.0)));
        assert_eq!(
            record.filters,
            vec![FilterHint::DesignHint {
                value: "Butterworth".to_string()
            }]
        );
        assert_eq!(record.params.nperseg, Some(2048));
        assert_eq!(record.params.window.as_deref(), Some("hann"));
        assert_eq!(record.confidence, 1.0);
    }

    #[test]
    fn test_assignment_beats_enrichment_candidate() {
        let text = "fs=500 while the 2000Hz (sampling) clock drifted";
        assert_eq!(extract_parameters(text).fs, Some(500.0));
        assert_eq!(lexical().extract(text).fs, Some(500.0));
    }

    #[test]
    fn test_enrichment_only_candidate() {
        let text = "Sampling frequency was 256 Hz throughout.";
        assert_eq!(extract_parameters(text).fs, None);
        assert_eq!(lexical().extract(text).fs, Some(256.0));
    }

    fn seeded_path(path: &str) -> ExtractionRecord {
        ExtractionRecord {
            data_path: Some(path.to_string()),
            ..Default::default()
        }
    }

    fn lexical_doc(text: &str) -> Doc {
        Doc::analyze(&LexicalEnrichment::new(), text).unwrap()
    }

    #[test]
    fn test_path_literal_overwrites_enrichment_path() {
        let extractor = lexical();
        let mut record = seeded_path("~/eeg/rec.fif");

        extractor.detect_data_path("Data were stored at ~/eeg/rec.fif", None, &mut record);

        assert_eq!(record.data_path.as_deref(), Some("/eeg/rec.fif"));
    }

    #[test]
    fn test_data_phrase_overwrites_enrichment_path() {
        let extractor = lexical();
        let mut record = seeded_path("eeg/rec+.fif");

        extractor.detect_data_path("Data were recorded at 1 kHz", None, &mut record);

        assert_eq!(record.data_path.as_deref(), Some("were"));
    }

    #[test]
    fn test_token_path_only_fills_empty_slot() {
        let extractor = lexical();
        let text = "Recordings in eeg/a+.fif";
        let doc = lexical_doc(text);

        let mut empty = ExtractionRecord::default();
        extractor.detect_data_path(text, Some(&doc), &mut empty);
        assert_eq!(empty.data_path.as_deref(), Some("eeg/a+.fif"));

        let mut seeded = seeded_path("eeg/b+.fif");
        extractor.detect_data_path(text, Some(&doc), &mut seeded);
        assert_eq!(seeded.data_path.as_deref(), Some("eeg/b+.fif"));
    }

    #[test]
    fn test_loose_fs_forms_keep_enrichment_value() {
        let extractor = lexical();

        // Hz near a context keyword, then a sampling token before NUM Hz
        for (text, loose) in [
            ("line noise 50 Hz; signals downsampled", 50.0),
            ("frequency 300 Hz overall", 300.0),
        ] {
            let doc = lexical_doc(text);

            let mut empty = ExtractionRecord::default();
            extractor.detect_fs(text, Some(&doc), &mut empty);
            assert_eq!(empty.fs, Some(loose));

            let mut seeded = ExtractionRecord {
                fs: Some(250.0),
                ..Default::default()
            };
            extractor.detect_fs(text, Some(&doc), &mut seeded);
            assert_eq!(seeded.fs, Some(250.0));
        }
    }

    #[test]
    fn test_enrichment_fs_survives_loose_forms() {
        let text = "line noise 50 Hz; signals downsampled to 250 Hz";

        assert_eq!(extract_parameters(text).fs, Some(50.0));
        assert_eq!(lexical().extract(text).fs, Some(250.0));
    }

    #[test]
    fn test_failing_source_is_swallowed() {
        let extractor = MethodsExtractor::new().with_enrichment(Arc::new(FailingSource));
        let text = "Sampling rate was 2048Hz and ICA was performed.";

        assert_eq!(extractor.extract(text), extract_parameters(text));
    }

    #[test]
    fn test_from_config() {
        let none = MethodsExtractor::from_config(&ExtractionConfig {
            enrichment: EnrichmentMode::None,
        });
        assert_eq!(none.enrichment_name(), None);

        let lexical = MethodsExtractor::from_config(&ExtractionConfig::default());
        assert_eq!(lexical.enrichment_name(), Some("lexical"));
        assert_eq!(
            format!("{:?}", lexical),
            "MethodsExtractor { enrichment: Some(\"lexical\") }"
        );
    }
}
