//! Extraction record produced for one piece of Methods text.

use serde::{Deserialize, Serialize};

/// Structured signal-processing parameters extracted from text.
///
/// `methods` and `filters` are always present (possibly empty); the other
/// fields are either wholly absent or fully populated. `confidence` is
/// computed last, from field presence only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    /// Detected analysis methods, in fixed check order.
    #[serde(default)]
    pub methods: Vec<Method>,

    /// Spectral-analysis parameters.
    #[serde(default)]
    pub params: Params,

    /// Passband in Hz.
    #[serde(default)]
    pub bandpass: Option<Bandpass>,

    /// Filter hints, in lowpass, highpass, design hint order.
    #[serde(default)]
    pub filters: Vec<FilterHint>,

    /// Data file path as written in the text (not validated).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<String>,

    /// Sampling rate in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs: Option<f64>,

    /// Heuristic confidence in `[0.0, 1.0]`.
    #[serde(default)]
    pub confidence: f64,
}

impl ExtractionRecord {
    /// Append a method tag unless it is already present.
    pub fn push_method(&mut self, method: Method) {
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
    }

    /// Check whether a method was detected.
    pub fn has_method(&self, method: Method) -> bool {
        self.methods.contains(&method)
    }

    /// Lowpass cutoff, if one was detected.
    pub fn lowpass_cutoff(&self) -> Option<f64> {
        self.filters.iter().find_map(|f| match f {
            FilterHint::Lowpass { cutoff } => Some(*cutoff),
            _ => None,
        })
    }

    /// Highpass cutoff, if one was detected.
    pub fn highpass_cutoff(&self) -> Option<f64> {
        self.filters.iter().find_map(|f| match f {
            FilterHint::Highpass { cutoff } => Some(*cutoff),
            _ => None,
        })
    }

    /// Filter design family mentioned in the text, if any.
    pub fn design_hint(&self) -> Option<&str> {
        self.filters.iter().find_map(|f| match f {
            FilterHint::DesignHint { value } => Some(value.as_str()),
            _ => None,
        })
    }

    /// Check if no field was extracted.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
            && self.params.is_empty()
            && self.bandpass.is_none()
            && self.filters.is_empty()
            && self.data_path.is_none()
            && self.fs.is_none()
    }
}

/// Analysis method tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// Welch's averaged periodogram.
    Welch,
    /// Fast Fourier transform.
    #[serde(rename = "FFT")]
    Fft,
    /// Independent component analysis.
    #[serde(rename = "ICA")]
    Ica,
    /// MNE-Python toolkit.
    #[serde(rename = "MNE")]
    Mne,
}

impl Method {
    /// All tags, in detection order.
    pub const ALL: [Method; 4] = [Method::Welch, Method::Fft, Method::Ica, Method::Mne];

    /// Display label used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Welch => "Welch",
            Method::Fft => "FFT",
            Method::Ica => "ICA",
            Method::Mne => "MNE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spectral-analysis parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Segment length for Welch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nperseg: Option<u64>,

    /// Window function name (e.g. `hann`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<String>,

    /// FFT length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nfft: Option<u64>,
}

impl Params {
    /// Check if no parameter was extracted.
    pub fn is_empty(&self) -> bool {
        self.nperseg.is_none() && self.window.is_none() && self.nfft.is_none()
    }
}

/// Filter passband in Hz, serialized as a `[low, high]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "(f64, f64)", from = "(f64, f64)")]
pub struct Bandpass {
    /// Lower edge in Hz.
    pub low_hz: f64,
    /// Upper edge in Hz.
    pub high_hz: f64,
}

impl Bandpass {
    pub fn new(low_hz: f64, high_hz: f64) -> Self {
        Self { low_hz, high_hz }
    }
}

impl From<(f64, f64)> for Bandpass {
    fn from((low_hz, high_hz): (f64, f64)) -> Self {
        Self { low_hz, high_hz }
    }
}

impl From<Bandpass> for (f64, f64) {
    fn from(bandpass: Bandpass) -> Self {
        (bandpass.low_hz, bandpass.high_hz)
    }
}

/// A filter hint found in the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterHint {
    /// Lowpass cutoff in Hz.
    Lowpass { cutoff: f64 },
    /// Highpass cutoff in Hz.
    Highpass { cutoff: f64 },
    /// Filter family mentioned without parameters (e.g. Butterworth).
    DesignHint { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_method_dedupes() {
        let mut record = ExtractionRecord::default();
        record.push_method(Method::Fft);
        record.push_method(Method::Fft);
        assert_eq!(record.methods, vec![Method::Fft]);
    }

    #[test]
    fn test_serialize_empty_record() {
        let json = serde_json::to_value(ExtractionRecord::default()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "methods": [],
                "params": {},
                "bandpass": null,
                "filters": [],
                "confidence": 0.0
            })
        );
    }

    #[test]
    fn test_serialize_filters_and_methods() {
        let record = ExtractionRecord {
            methods: vec![Method::Welch, Method::Ica],
            filters: vec![
                FilterHint::Lowpass { cutoff: 40.0 },
                FilterHint::DesignHint { value: "butter".to_string() },
            ],
            fs: Some(250.0),
            ..Default::default()
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["methods"], serde_json::json!(["Welch", "ICA"]));
        assert_eq!(json["filters"][0], serde_json::json!({"type": "lowpass", "cutoff": 40.0}));
        assert_eq!(
            json["filters"][1],
            serde_json::json!({"type": "design_hint", "value": "butter"})
        );
        assert_eq!(json["fs"], serde_json::json!(250.0));
        assert!(json.get("data_path").is_none());
    }

    #[test]
    fn test_bandpass_is_a_pair() {
        let record = ExtractionRecord {
            bandpass: Some(Bandpass::new(1.0, 40.0)),
            ..Default::default()
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["bandpass"], serde_json::json!([1.0, 40.0]));

        let back: ExtractionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.bandpass, Some(Bandpass::new(1.0, 40.0)));
    }

    #[test]
    fn test_filter_accessors() {
        let record = ExtractionRecord {
            filters: vec![
                FilterHint::Lowpass { cutoff: 40.0 },
                FilterHint::Highpass { cutoff: 0.5 },
            ],
            ..Default::default()
        };

        assert_eq!(record.lowpass_cutoff(), Some(40.0));
        assert_eq!(record.highpass_cutoff(), Some(0.5));
        assert_eq!(record.design_hint(), None);
    }
}
