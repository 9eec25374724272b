//! Common regex patterns for blood panel extraction.
//!
//! Digit classes are spelled `[0-9]` because `\d` in `regex` is Unicode-aware
//! and would accept Arabic-Indic or full-width digits.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Multiplication glyphs in "x10^3" style unit prefixes
    pub static ref MULTIPLY_SIGN: Regex = Regex::new(r"[×x*]").unwrap();

    // Powers of ten: 10³, 10^3, 10⁶, 10^6
    pub static ref POWER_OF_TEN_3: Regex = Regex::new(r"10\^?[³3]").unwrap();

    pub static ref POWER_OF_TEN_6: Regex = Regex::new(r"10\^?[⁶6]").unwrap();

    // Volume units: /μL, /uL, /dL, /L
    pub static ref VOLUME_UNIT: Regex = Regex::new(r"(?i)/\s*(?:μl|ul|dl|l)").unwrap();

    pub static ref NON_NUMERIC: Regex = Regex::new(r"[^0-9.]").unwrap();

    pub static ref NUMBER_RUN: Regex = Regex::new(r"[0-9.]+").unwrap();

    // Longest valid decimal at the start of a digit/period run
    pub static ref LEADING_DECIMAL: Regex = Regex::new(r"^(?:[0-9]+\.?[0-9]*|\.[0-9]+)").unwrap();

    // Inline "WBC: 5.0" / "HGB = 13.2"
    pub static ref INLINE_VALUE: Regex = Regex::new(
        r"([A-Za-z0-9_]+)\s*[:=]\s*([0-9.]+)"
    ).unwrap();
}
