//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SigexError};

/// Main configuration for sigex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigexConfig {
    /// Extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Which enrichment source to inject into the extractor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentMode {
    /// Deterministic detectors only.
    None,
    /// Built-in lexical tokenizer and entity tagger.
    #[default]
    Lexical,
}

/// Extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Enrichment source used before the deterministic detectors.
    pub enrichment: EnrichmentMode,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,

    /// Suffix appended to the input path for sidecar files.
    pub sidecar_suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            sidecar_suffix: ".extraction.json".to_string(),
        }
    }
}

impl SigexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| SigexError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SigexConfig =
            serde_json::from_str(r#"{"extraction": {"enrichment": "none"}}"#).unwrap();

        assert_eq!(config.extraction.enrichment, EnrichmentMode::None);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_default_enrichment_is_lexical() {
        assert_eq!(SigexConfig::default().extraction.enrichment, EnrichmentMode::Lexical);
    }
}
