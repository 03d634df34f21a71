//! Spectral-analysis parameter extraction (`nperseg`, `window`, `nfft`).

use regex::Regex;
use tracing::debug;

use super::patterns::{NFFT, NPERSEG, WINDOW};
use super::ExtractionMatch;
use crate::enrichment::Doc;
use crate::error::ExtractionError;
use crate::models::record::Params;

/// Parse a run of digits captured for `field`.
pub fn parse_count(field: &str, digits: &str) -> Result<u64, ExtractionError> {
    digits.parse().map_err(|_| ExtractionError::NumberParse {
        field: field.to_string(),
        value: digits.to_string(),
    })
}

fn first_integer(field: &str, pattern: &Regex, text: &str) -> Option<ExtractionMatch<u64>> {
    let caps = pattern.captures(text)?;
    let value = match parse_count(field, &caps[1]) {
        Ok(value) => value,
        Err(e) => {
            debug!("{}", e);
            return None;
        }
    };
    let full = caps.get(0)?;
    Some(ExtractionMatch::new(value, full.as_str()).with_position(full.start(), full.end()))
}

/// Extract `nperseg` (e.g. `nperseg=2048`, `nperseg: 512`).
pub fn extract_nperseg(text: &str) -> Option<ExtractionMatch<u64>> {
    first_integer("nperseg", &NPERSEG, text)
}

/// Extract `nfft` (e.g. `nfft=4096`).
pub fn extract_nfft(text: &str) -> Option<ExtractionMatch<u64>> {
    first_integer("nfft", &NFFT, text)
}

/// Extract the window name (e.g. `window='hann'`).
pub fn extract_window(text: &str) -> Option<ExtractionMatch<String>> {
    let caps = WINDOW.captures(text)?;
    let full = caps.get(0)?;
    Some(
        ExtractionMatch::new(caps[1].to_string(), full.as_str())
            .with_position(full.start(), full.end()),
    )
}

/// Token fallback: a token starting with `nperseg` followed by a numeric token.
pub fn nperseg_from_tokens(doc: &Doc) -> Option<u64> {
    doc.tokens().windows(2).find_map(|pair| {
        if !pair[0].lower().starts_with("nperseg") || !pair[1].like_num {
            return None;
        }
        pair[1]
            .as_f64()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.trunc() as u64)
    })
}

/// Extract all spectral parameters. Each key is written at most once.
pub fn extract_params(text: &str, doc: Option<&Doc>) -> Params {
    let nperseg = extract_nperseg(text)
        .map(|m| m.value)
        .or_else(|| doc.and_then(nperseg_from_tokens));

    Params {
        nperseg,
        window: extract_window(text).map(|m| m.value),
        nfft: extract_nfft(text).map(|m| m.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::Token;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_params_separators() {
        let params = extract_params("nperseg=2048, window=hann", None);
        assert_eq!(
            params,
            Params {
                nperseg: Some(2048),
                window: Some("hann".to_string()),
                nfft: None,
            }
        );

        assert_eq!(extract_nperseg("NPERSEG: 512").map(|m| m.value), Some(512));
        assert_eq!(extract_nperseg("nperseg 1024").map(|m| m.value), Some(1024));
        assert_eq!(extract_nfft("nfft=4096").map(|m| m.value), Some(4096));
    }

    #[test]
    fn test_quoted_window() {
        assert_eq!(
            extract_window("window='hamming'").map(|m| m.value),
            Some("hamming".to_string())
        );
        assert_eq!(
            extract_window("Window: blackman-harris").map(|m| m.value),
            Some("blackman-harris".to_string())
        );
    }

    #[test]
    fn test_match_position() {
        let m = extract_nperseg("with nperseg=256 segments").unwrap();
        assert_eq!(m.source, "nperseg=256");
        assert_eq!(m.position, Some((5, 16)));
    }

    #[test]
    fn test_token_fallback() {
        let doc = Doc::new(
            "nperseg_len 1,024 nperseg 300.0",
            vec![
                Token::new("nperseg_len", 0, 11, false),
                Token::new("1,024", 12, 17, true),
                Token::new("nperseg", 18, 25, false),
                Token::new("300.0", 26, 31, true),
            ],
            Vec::new(),
            Vec::new(),
        );

        // "1,024" is number-like but does not parse; the next pair does
        assert_eq!(nperseg_from_tokens(&doc), Some(300));
        assert_eq!(extract_params("no direct match", Some(&doc)).nperseg, Some(300));
    }

    #[test]
    fn test_count_overflow_is_dropped() {
        let digits = "99999999999999999999999";

        assert_eq!(
            parse_count("nperseg", digits),
            Err(ExtractionError::NumberParse {
                field: "nperseg".to_string(),
                value: digits.to_string(),
            })
        );
        assert!(extract_nperseg(&format!("nperseg={}", digits)).is_none());

        let params = extract_params(&format!("nperseg={}, nfft=512", digits), None);
        assert_eq!(params.nperseg, None);
        assert_eq!(params.nfft, Some(512));
    }

    #[test]
    fn test_no_params() {
        assert_eq!(extract_params("Participants rested.", None), Params::default());
    }
}
