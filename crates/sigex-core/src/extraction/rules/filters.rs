//! Filter hint extraction (lowpass/highpass cutoffs and design families).

use regex::Regex;

use super::patterns::{FILTER_DESIGN_MENTION, FILTER_DESIGN_TOKEN, HIGHPASS, LOWPASS};
use crate::models::record::FilterHint;

fn first_cutoff(pattern: &Regex, text: &str) -> Option<f64> {
    pattern.captures(text).and_then(|caps| caps[1].parse().ok())
}

/// Extract the first lowpass cutoff in Hz.
pub fn extract_lowpass(text: &str) -> Option<f64> {
    first_cutoff(&LOWPASS, text)
}

/// Extract the first highpass cutoff in Hz.
pub fn extract_highpass(text: &str) -> Option<f64> {
    first_cutoff(&HIGHPASS, text)
}

/// Extract the first filter family token (`butterworth`, `butter`, `fir`, `iir`),
/// keeping its original casing.
pub fn extract_design_hint(text: &str) -> Option<String> {
    if !FILTER_DESIGN_MENTION.is_match(text) {
        return None;
    }
    FILTER_DESIGN_TOKEN
        .captures(text)
        .map(|caps| caps[1].to_string())
}

/// Extract filter hints in lowpass, highpass, design hint order.
pub fn extract_filters(text: &str) -> Vec<FilterHint> {
    let mut filters = Vec::new();

    if let Some(cutoff) = extract_lowpass(text) {
        filters.push(FilterHint::Lowpass { cutoff });
    }
    if let Some(cutoff) = extract_highpass(text) {
        filters.push(FilterHint::Highpass { cutoff });
    }
    if let Some(value) = extract_design_hint(text) {
        filters.push(FilterHint::DesignHint { value });
    }

    filters
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_all_hints_in_fixed_order() {
        let text = "A 4th-order Butterworth high-pass 0.5 Hz and low-pass: 40 Hz were applied.";

        assert_eq!(
            extract_filters(text),
            vec![
                FilterHint::Lowpass { cutoff: 40.0 },
                FilterHint::Highpass { cutoff: 0.5 },
                FilterHint::DesignHint {
                    value: "Butterworth".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_first_occurrence_only() {
        let filters = extract_filters("lowpass 30 Hz, later lowpass 45 Hz");
        assert_eq!(filters, vec![FilterHint::Lowpass { cutoff: 30.0 }]);
    }

    #[test]
    fn test_design_hint_variants() {
        assert_eq!(extract_design_hint("an FIR filter"), Some("FIR".to_string()));
        assert_eq!(extract_design_hint("scipy butter design"), Some("butter".to_string()));
        assert_eq!(extract_design_hint("no hint"), None);
    }

    #[test]
    fn test_cutoff_requires_hz() {
        assert_eq!(extract_lowpass("lowpass 40 samples"), None);
        assert_eq!(extract_highpass("highpass=1.5Hz"), Some(1.5));
    }
}
