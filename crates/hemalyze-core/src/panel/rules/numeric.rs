//! Numeric value extraction from lab report cells and lines.

use super::patterns::{
    LEADING_DECIMAL, MULTIPLY_SIGN, NON_NUMERIC, NUMBER_RUN, POWER_OF_TEN_3, POWER_OF_TEN_6,
    VOLUME_UNIT,
};

/// Extract the first number from a raw cell or line.
///
/// Unit decorations (`×10³/μL`, `%`, `/dL`) are stripped before the first
/// run of digits and periods is read. Returns `None` when nothing numeric
/// remains; further numbers in the same text are ignored.
pub fn extract_value(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }

    let lower = text.to_lowercase();
    let cleaned = MULTIPLY_SIGN.replace_all(&lower, "");
    let cleaned = POWER_OF_TEN_3.replace_all(&cleaned, "");
    let cleaned = POWER_OF_TEN_6.replace_all(&cleaned, "");
    let cleaned = VOLUME_UNIT.replace_all(&cleaned, "");
    let cleaned = cleaned.replace('%', "");
    let cleaned = NON_NUMERIC.replace_all(&cleaned, " ");

    let run = NUMBER_RUN.find(cleaned.trim())?;
    parse_leading_float(run.as_str())
}

/// Parse the longest valid decimal prefix of a digit/period run.
///
/// `"5.4.3"` reads as 5.4 and `"7."` as 7; a run with no digit before
/// its second period (`"."`, `"..5"`) has no value.
pub fn parse_leading_float(run: &str) -> Option<f64> {
    let prefix = LEADING_DECIMAL.find(run)?;
    prefix.as_str().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_value_with_units() {
        assert_eq!(extract_value("5.4 x10³/μL"), Some(5.4));
        assert_eq!(extract_value("4.7 ×10^6/uL"), Some(4.7));
        assert_eq!(extract_value("250 * 10^3 / µL"), Some(250.0));
        assert_eq!(extract_value("13.2 g/dL"), Some(13.2));
    }

    #[test]
    fn test_extract_value_percent() {
        assert_eq!(extract_value("42%"), Some(42.0));
        assert_eq!(extract_value(" 3.5 % "), Some(3.5));
    }

    #[test]
    fn test_extract_value_none() {
        assert_eq!(extract_value("no data"), None);
        assert_eq!(extract_value(""), None);
        assert_eq!(extract_value("..."), None);
    }

    #[test]
    fn test_extract_value_first_number_wins() {
        assert_eq!(extract_value("WBC 6.2 (4.0 - 11.0)"), Some(6.2));
    }

    #[test]
    fn test_power_marker_swallows_plain_digits() {
        // "103" looks like "10" + exponent "3" and is stripped.
        assert_eq!(extract_value("103 12"), Some(12.0));
    }

    #[test]
    fn test_parse_leading_float() {
        assert_eq!(parse_leading_float("5.4.3"), Some(5.4));
        assert_eq!(parse_leading_float("7."), Some(7.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float("..5"), None);
    }
}
