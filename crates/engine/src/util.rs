//! Internal helpers for input normalization.
//!
//! Apart from [`normalize_title`], these utilities are **not** part of the
//! public API. They centralize the lenient parsing rules so every engine
//! function treats partially filled input the same way.

use chrono::{DateTime, NaiveDate};

use crate::{EngineError, ResultEngine};

/// Parse a calendar date submitted by a form.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (its calendar date is used).
/// Returns `None` on anything else.
pub(crate) fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Keep a numeric field only when it is a finite, strictly positive value.
pub(crate) fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Round half-way values towards positive infinity.
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Trim a required title, rejecting blank values.
///
/// The store itself accepts any title; callers facing user input run titles
/// through this first.
pub fn normalize_title(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!(
            "{label} title must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional date string, mapping blank values to `None`.
pub(crate) fn normalize_optional_date(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_rfc3339_dates() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 14);
        assert_eq!(parse_calendar_date("2026-03-14"), expected);
        assert_eq!(parse_calendar_date(" 2026-03-14 "), expected);
        assert_eq!(parse_calendar_date("2026-03-14T08:30:00Z"), expected);
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("next tuesday"), None);
        assert_eq!(parse_calendar_date("2026-02-30"), None);
    }

    #[test]
    fn positive_filters_zero_negative_and_nan() {
        assert_eq!(positive(Some(2.5)), Some(2.5));
        assert_eq!(positive(Some(0.0)), None);
        assert_eq!(positive(Some(-1.0)), None);
        assert_eq!(positive(Some(f64::NAN)), None);
        assert_eq!(positive(None), None);
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(0.49), 0);
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(normalize_title("   ", "goal").is_err());
        assert_eq!(normalize_title(" Run ", "goal").unwrap(), "Run");
    }
}
