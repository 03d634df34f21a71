//! Frequency unit normalization.

use crate::error::ExtractionError;

/// Convert a frequency literal such as `"1 kHz"`, `"2MHz"` or `"1000Hz"` to Hz.
///
/// Whitespace is removed and the literal lower-cased. A `khz` suffix scales
/// by 1e3, `mhz` by 1e6; anything else is read as Hz after dropping every
/// character that is not a digit or a decimal point.
pub fn freq_to_hz(literal: &str) -> Result<f64, ExtractionError> {
    let compact: String = literal
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let scale = if compact.ends_with("khz") {
        1_000.0
    } else if compact.ends_with("mhz") {
        1_000_000.0
    } else {
        1.0
    };

    let numeric: String = compact
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if !numeric.chars().any(|c| c.is_ascii_digit()) {
        return Err(ExtractionError::UnitParse {
            value: literal.to_string(),
        });
    }

    numeric
        .parse::<f64>()
        .map(|value| value * scale)
        .map_err(|_| ExtractionError::UnitParse {
            value: literal.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_scaling() {
        assert_eq!(freq_to_hz("1 kHz"), Ok(1000.0));
        assert_eq!(freq_to_hz("2MHz"), Ok(2_000_000.0));
        assert_eq!(freq_to_hz("1000Hz"), Ok(1000.0));
        assert_eq!(freq_to_hz(" 2 . 5  khz "), Ok(2500.0));
    }

    #[test]
    fn test_bare_number_is_hz() {
        assert_eq!(freq_to_hz("250"), Ok(250.0));
        assert_eq!(freq_to_hz("0.5"), Ok(0.5));
    }

    #[test]
    fn test_no_digits_is_error() {
        assert!(matches!(
            freq_to_hz("kHz"),
            Err(ExtractionError::UnitParse { .. })
        ));
        assert!(freq_to_hz("").is_err());
        assert!(freq_to_hz(".hz").is_err());
    }

    #[test]
    fn test_malformed_number_is_error() {
        assert!(freq_to_hz("1.2.3 Hz").is_err());
    }
}
