//! Shared parsing and formatting helpers.
//!
//! Every coercion in the engine goes through these functions so that type
//! inference, quality scoring and pattern detection agree on what counts as
//! a number or a date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use polars::prelude::DataType;
use regex::Regex;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a polars DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// Numeric Parsing
// =============================================================================

/// Parse a string as a finite number.
///
/// Surrounding whitespace is ignored. Blank strings, `inf` and `NaN` are not
/// numbers. Unlike currency detection, no formatting characters are stripped:
/// `"1,000"` is text.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(parse_numeric("  42.5 "), Some(42.5));
/// assert_eq!(parse_numeric("1e3"), Some(1000.0));
/// assert_eq!(parse_numeric("$10"), None);
/// ```
pub fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Check if a string can be parsed as a finite number.
pub fn is_numeric_string(s: &str) -> bool {
    parse_numeric(s).is_some()
}

// =============================================================================
// Currency Detection
// =============================================================================

// `R$` (real) is tried before the single-character symbols.
static CURRENCY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:R\$|[R$€£¥])\s*[\d,.]+(?:,\d{2})?$").expect("Invalid regex: currency")
});

/// Check if a string is a currency-prefixed amount such as `$1,200.50` or `R$ 10,00`.
pub fn is_currency_string(s: &str) -> bool {
    CURRENCY_PATTERN.is_match(s)
}

// =============================================================================
// Date Parsing
// =============================================================================

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d %b %Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 12] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%a, %d %b %Y",
];

/// Leniently parse a string as a calendar date or timestamp.
///
/// Accepts RFC 3339 / RFC 2822 timestamps, ISO-like dates with `-`, `/` or `.`
/// separators, US `month/day/year` dates, English month names and bare
/// `year-month` values. Plain numbers are never dates.
pub fn parse_date_lenient(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() || is_numeric_string(trimmed) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Some(dt);
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
    {
        return date.and_hms_opt(0, 0, 0);
    }

    // Year-month values such as "2024-03"
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Check if a string parses as a date under [`parse_date_lenient`].
pub fn is_date_string(s: &str) -> bool {
    parse_date_lenient(s).is_some()
}

// =============================================================================
// Rounding and Formatting
// =============================================================================

/// Round to the nearest integer, with halves rounded towards positive infinity.
///
/// `2.5` becomes `3` and `-2.5` becomes `-2`. Scores, percentages and forecast
/// values all round this way.
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Format an integer with `,` thousands separators (`12345` -> `"12,345"`).
pub fn format_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
