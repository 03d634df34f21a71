//! Common regex patterns for Methods-text parameter extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// File extensions accepted as data files.
pub const DATA_EXTENSIONS: [&str; 5] = [".csv", ".mat", ".npy", ".fif", ".edf"];

/// Whole-token keywords that mark a number-then-Hz pair as a sampling rate.
pub const SAMPLING_TOKENS: [&str; 4] = ["sampling", "rate", "frequency", "fs"];

lazy_static! {
    // Analysis methods
    pub static ref WELCH: Regex = Regex::new(
        r"(?i)\bwelch(?:'s)?(?:\s+method)?\b"
    ).unwrap();

    pub static ref FFT: Regex = Regex::new(r"(?i)\bfft\b").unwrap();

    pub static ref ICA: Regex = Regex::new(r"(?i)\bica\b").unwrap();

    pub static ref MNE: Regex = Regex::new(r"(?i)\bmne\b").unwrap();

    // Spectral parameters (nperseg=2048, window: 'hann', nfft 4096)
    pub static ref NPERSEG: Regex = Regex::new(
        r"(?i)\bnperseg\b\s*[=:\s]?\s*(\d+)"
    ).unwrap();

    pub static ref WINDOW: Regex = Regex::new(
        r"(?i)\bwindow\b\s*[=:\s]?\s*'?([A-Za-z0-9_\-]+)'?"
    ).unwrap();

    pub static ref NFFT: Regex = Regex::new(
        r"(?i)\bnfft\b\s*[=:\s]?\s*(\d+)"
    ).unwrap();

    // Frequency ranges (1-40 Hz, 0.5 to 30 Hz, 1-2 kHz)
    pub static ref FREQ_RANGE: Regex = Regex::new(
        r"(?i)([0-9]+(?:\.[0-9]+)?)\s*(?:-|to)\s*([0-9]+(?:\.[0-9]+)?)\s*(khz|mhz|hz)?"
    ).unwrap();

    // Filter hints
    pub static ref LOWPASS: Regex = Regex::new(
        r"(?i)low-?pass\s*(?:[:=]\s*)?(\d+(?:\.\d+)?)\s*Hz"
    ).unwrap();

    pub static ref HIGHPASS: Regex = Regex::new(
        r"(?i)high-?pass\s*(?:[:=]\s*)?(\d+(?:\.\d+)?)\s*Hz"
    ).unwrap();

    pub static ref FILTER_DESIGN_MENTION: Regex = Regex::new(
        r"(?i)butterworth|butter\b|fir\b|iir\b"
    ).unwrap();

    pub static ref FILTER_DESIGN_TOKEN: Regex = Regex::new(
        r"(?i)(butterworth|butter|fir|iir)"
    ).unwrap();

    // Data paths (C:\data\subj.mat, data/subject1/session1.csv, 'rec.fif')
    pub static ref DATA_PATH: Regex = Regex::new(
        r#"(?i)(?P<path>['"]?(?:[A-Za-z]:)?[\\/\w\-\.]+\.(?:csv|mat|npy|fif|edf)['"]?)"#
    ).unwrap();

    pub static ref DATA_PHRASE: Regex = Regex::new(
        r#"(?i)data\s*(?:file|set)?\s*(?:[:=\-])?\s*['"]?(?P<path>[\w\-/\\\.]+)['"]?"#
    ).unwrap();

    // Sampling rate
    pub static ref FS_ASSIGNMENT: Regex = Regex::new(
        r"(?i)\bfs\b\s*[=:\s]?\s*([0-9]+(?:\.[0-9]+)?\s*(?:khz|mhz|hz)?)"
    ).unwrap();

    pub static ref SAMPLING_RATE_PHRASE: Regex = Regex::new(
        r"(?i)sampling rate\s*(?:is|was)?\s*([0-9]+(?:\.[0-9]+)?\s*(?:khz|mhz|hz)?)"
    ).unwrap();

    pub static ref NUMBER_HZ: Regex = Regex::new(
        r"(?i)(\d+(?:\.\d+)?)\s*hz"
    ).unwrap();

    pub static ref NUMBER_WITH_UNIT: Regex = Regex::new(
        r"(\d+(?:\.\d+)?\s*(?:khz|mhz|hz))"
    ).unwrap();

    // Single-token shapes used by the lexical enrichment source
    pub static ref ATTACHED_FREQUENCY: Regex = Regex::new(
        r"(?i)^[0-9]+(?:\.[0-9]+)?[km]?hz$"
    ).unwrap();

    pub static ref WINDOWS_PATH_TOKEN: Regex = Regex::new(
        r"(?i)^[A-Za-z]:\\.*\.(?:csv|mat|npy|fif|edf)$"
    ).unwrap();

    pub static ref UNIX_PATH_TOKEN: Regex = Regex::new(
        r"(?i)^/.*/.*\.(?:csv|mat|npy|fif|edf)$"
    ).unwrap();
}

/// Check whether a lower-cased path ends with a known data extension.
pub fn has_data_extension(path: &str) -> bool {
    let lower = path.to_lowercase();
    DATA_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Strip surrounding single and double quotes.
pub fn strip_quotes(s: &str) -> &str {
    s.trim_matches(|c| c == '\'' || c == '"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_extension() {
        assert!(has_data_extension("rec.FIF"));
        assert!(has_data_extension("C:\\data\\subj.mat"));
        assert!(!has_data_extension("notes.txt"));
    }

    #[test]
    fn test_path_tokens() {
        assert!(WINDOWS_PATH_TOKEN.is_match("C:\\data\\subj1\\rec.fif"));
        assert!(UNIX_PATH_TOKEN.is_match("/mnt/eeg/rec.edf"));
        assert!(!UNIX_PATH_TOKEN.is_match("data/rec.edf"));
        assert!(ATTACHED_FREQUENCY.is_match("2048Hz"));
        assert!(ATTACHED_FREQUENCY.is_match("1.5kHz"));
        assert!(!ATTACHED_FREQUENCY.is_match("Hz"));
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("'rec.fif'"), "rec.fif");
        assert_eq!(strip_quotes("\"a.csv"), "a.csv");
    }
}
