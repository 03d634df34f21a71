//! Core library for signal-processing parameter extraction.
//!
//! This crate provides:
//! - Rule-based detectors for analysis methods, spectral parameters,
//!   passbands, filter hints, data paths and sampling rates
//! - An optional enrichment layer (tokens, entities, token patterns)
//! - Confidence scoring of the assembled record
//! - Serializable record and configuration models

pub mod error;
pub mod models;
pub mod enrichment;
pub mod extraction;

pub use error::{SigexError, Result};
pub use models::config::{EnrichmentMode, ExtractionConfig, SigexConfig};
pub use models::record::{Bandpass, ExtractionRecord, FilterHint, Method, Params};
pub use enrichment::{EnrichmentSource, LexicalEnrichment, NoEnrichment};
pub use extraction::{
    compute_confidence, extract_parameters, freq_to_hz, MethodsExtractor, ParameterExtractor,
};
