//! Data file path extraction.

use super::patterns::{has_data_extension, strip_quotes, DATA_PATH, DATA_PHRASE};
use super::{ExtractionMatch, FieldExtractor};
use crate::enrichment::Doc;

/// Data path extractor: a path-shaped literal with a known data extension,
/// else a `data file: ...` / `dataset = ...` phrase.
pub struct DataPathExtractor;

impl DataPathExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Path-shaped literal ending in `.csv|.mat|.npy|.fif|.edf`, quotes stripped.
    pub fn extract_path_literal(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let caps = DATA_PATH.captures(text)?;
        let path = caps.name("path")?;
        Some(
            ExtractionMatch::new(strip_quotes(path.as_str()).to_string(), path.as_str())
                .with_position(path.start(), path.end()),
        )
    }

    /// Word following `data`, `data file` or `dataset` with an optional separator.
    pub fn extract_data_phrase(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let caps = DATA_PHRASE.captures(text)?;
        let full = caps.get(0)?;
        Some(
            ExtractionMatch::new(caps["path"].to_string(), full.as_str())
                .with_position(full.start(), full.end()),
        )
    }
}

impl Default for DataPathExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DataPathExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<ExtractionMatch<String>> {
        self.extract_path_literal(text)
            .or_else(|| self.extract_data_phrase(text))
    }
}

/// Token fallback: first token containing `/` that ends with a data extension.
pub fn data_path_from_tokens(doc: &Doc) -> Option<String> {
    doc.tokens()
        .iter()
        .find(|t| t.text.contains('/') && has_data_extension(strip_quotes(&t.text)))
        .map(|t| strip_quotes(&t.text).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::Token;

    fn path(text: &str) -> Option<String> {
        DataPathExtractor::new().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_unix_relative_path() {
        assert_eq!(
            path("stored in data/subject1/session1.csv."),
            Some("data/subject1/session1.csv".to_string())
        );
    }

    #[test]
    fn test_windows_path() {
        assert_eq!(
            path("EEG files at C:\\data\\subj.mat were loaded"),
            Some("C:\\data\\subj.mat".to_string())
        );
    }

    #[test]
    fn test_quoted_path() {
        assert_eq!(path("loaded from 'rec_01.FIF'"), Some("rec_01.FIF".to_string()));
    }

    #[test]
    fn test_data_phrase_fallback() {
        assert_eq!(
            path("Data file: recordings_2020"),
            Some("recordings_2020".to_string())
        );
        assert_eq!(path("dataset = 'openneuro-ds003'"), Some("openneuro-ds003".to_string()));
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(path("Participants rested quietly."), None);
    }

    #[test]
    fn test_token_fallback() {
        let doc = Doc::new(
            "see ./a.txt and ./runs/b.EDF",
            vec![
                Token::new("see", 0, 3, false),
                Token::new("./a.txt", 4, 11, false),
                Token::new("and", 12, 15, false),
                Token::new("./runs/b.EDF", 16, 28, false),
            ],
            Vec::new(),
            Vec::new(),
        );

        assert_eq!(data_path_from_tokens(&doc), Some("./runs/b.EDF".to_string()));
    }
}
