//! Analysis method detection.

use regex::Regex;

use super::patterns::{FFT, ICA, MNE, WELCH};
use crate::models::record::Method;

fn pattern_for(method: Method) -> &'static Regex {
    match method {
        Method::Welch => &*WELCH,
        Method::Fft => &*FFT,
        Method::Ica => &*ICA,
        Method::Mne => &*MNE,
    }
}

/// Detect method tags, in the fixed order Welch, FFT, ICA, MNE.
pub fn detect_methods(text: &str) -> Vec<Method> {
    Method::ALL
        .into_iter()
        .filter(|method| pattern_for(*method).is_match(text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welch_variants() {
        assert_eq!(detect_methods("Welch's method"), vec![Method::Welch]);
        assert_eq!(detect_methods("the welch method"), vec![Method::Welch]);
        assert_eq!(detect_methods("WELCH"), vec![Method::Welch]);
    }

    #[test]
    fn test_fixed_order_not_input_order() {
        assert_eq!(
            detect_methods("MNE was used for ICA after an FFT and Welch"),
            vec![Method::Welch, Method::Fft, Method::Ica, Method::Mne]
        );
    }

    #[test]
    fn test_word_boundaries() {
        assert!(detect_methods("optical fibers and mnemonic tricks").is_empty());
        assert_eq!(detect_methods("Power spectra (FFT)."), vec![Method::Fft]);
    }

    #[test]
    fn test_each_tag_once() {
        assert_eq!(detect_methods("ICA, then ICA again"), vec![Method::Ica]);
    }
}
