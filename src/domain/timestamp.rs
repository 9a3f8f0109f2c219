//! Timestamp parsing and the coarse age arithmetic
//!
//! Source timestamps use one fixed pattern, `YYYY-MM-DD HH:MM:SS.ffffff`,
//! with no timezone. Ages are whole elapsed days divided by 365, which is
//! intentionally not calendar-aware: a patient can be reported a year older
//! or younger than a calendar computation near their birthday.

use super::errors::ParseError;
use chrono::{Duration, Local, NaiveDateTime};

/// chrono pattern for the source timestamp format
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

const MAX_FRACTION_DIGITS: usize = 6;

/// Days per "year" in the age formula
pub const DAYS_PER_YEAR: i64 = 365;

/// Parses a timestamp in the fixed source format
///
/// # Errors
///
/// Returns `ParseError::Timestamp` if the value does not match the pattern
///
/// # Examples
///
/// ```
/// use medrecords::domain::timestamp::parse_timestamp;
/// use chrono::Timelike;
///
/// let ts = parse_timestamp("1947-12-28 02:45:40.547").unwrap();
/// assert_eq!(ts.nanosecond(), 547_000_000);
/// assert!(parse_timestamp("28/12/1947").is_err());
/// ```
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ParseError> {
    if !has_fraction(value) {
        return Err(ParseError::Timestamp {
            value: value.to_string(),
            reason: format!("expected 1 to {MAX_FRACTION_DIGITS} fractional second digits"),
        });
    }
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|e| ParseError::Timestamp {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

// chrono's `%.f` also accepts a missing fraction and up to nine digits
fn has_fraction(value: &str) -> bool {
    match value.split_once('.') {
        Some((_, fraction)) => {
            (1..=MAX_FRACTION_DIGITS).contains(&fraction.len())
                && fraction.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Whole days elapsed from `start` to `end`, rounded toward negative infinity
pub fn elapsed_days(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let elapsed = end - start;
    let days = elapsed.num_days();
    if elapsed < Duration::days(days) {
        days - 1
    } else {
        days
    }
}

/// Coarse age in years: elapsed whole days divided by 365, truncated
///
/// # Examples
///
/// ```
/// use medrecords::domain::timestamp::{coarse_years_between, parse_timestamp};
///
/// let dob = parse_timestamp("1990-01-01 00:00:00.000").unwrap();
/// let now = parse_timestamp("2023-01-01 00:00:00.000").unwrap();
/// // 12053 days / 365
/// assert_eq!(coarse_years_between(dob, now), 33);
/// ```
pub fn coarse_years_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    elapsed_days(start, end) / DAYS_PER_YEAR
}

/// Current local wall-clock time, matching the naive source timestamps
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Timelike};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_timestamp_with_millis() {
        let ts = parse_timestamp("1993-12-21 17:45:40.547").unwrap();
        assert_eq!(ts.year(), 1993);
        assert_eq!(ts.month(), 12);
        assert_eq!(ts.day(), 21);
        assert_eq!(ts.hour(), 17);
        assert_eq!(ts.minute(), 45);
        assert_eq!(ts.second(), 40);
        assert_eq!(ts.nanosecond(), 547_000_000);
    }

    #[test]
    fn test_parse_timestamp_with_micros() {
        let ts = parse_timestamp("2019-01-01 00:00:00.000123").unwrap();
        assert_eq!(ts.nanosecond(), 123_000);
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        let err = parse_timestamp("2019-13-01 00:00:00.000").unwrap_err();
        assert!(matches!(err, ParseError::Timestamp { .. }));
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("2019-01-01").is_err());
    }

    #[test]
    fn test_parse_timestamp_requires_fraction() {
        let err = parse_timestamp("2019-01-01 00:00:00").unwrap_err();
        assert!(matches!(err, ParseError::Timestamp { .. }));
        assert!(parse_timestamp("2019-01-01 00:00:00.").is_err());
    }

    #[test]
    fn test_parse_timestamp_rejects_sub_microsecond_digits() {
        assert!(parse_timestamp("2019-01-01 00:00:00.1234567").is_err());
        assert!(parse_timestamp("2019-01-01 00:00:00.123456").is_ok());
        assert!(parse_timestamp("2019-01-01 00:00:00.1").is_ok());
    }

    #[test]
    fn test_parse_timestamp_rejects_trailing_text() {
        assert!(parse_timestamp("2019-01-01 00:00:00.12a").is_err());
        assert!(parse_timestamp("2019-01-01 00:00:00.1.2").is_err());
    }

    #[test]
    fn test_elapsed_days_counts_leap_days() {
        assert_eq!(elapsed_days(at(1990, 1, 1), at(2023, 1, 1)), 12053);
    }

    #[test]
    fn test_elapsed_days_floors_partial_days() {
        let start = parse_timestamp("2019-01-01 12:00:00.000").unwrap();
        assert_eq!(elapsed_days(start, at(2019, 1, 3)), 1);
        assert_eq!(elapsed_days(at(2019, 1, 3), start), -2);
    }

    #[test]
    fn test_coarse_years_is_not_calendar_age() {
        // one day short of the fourth birthday, but 1460 / 365 = 4
        assert_eq!(coarse_years_between(at(2000, 1, 2), at(2004, 1, 1)), 4);
        // 365 days inside a leap year already counts as one year
        assert_eq!(coarse_years_between(at(2000, 1, 1), at(2000, 12, 31)), 1);
    }

    #[test]
    fn test_coarse_years_albumin_scenario() {
        let dob = parse_timestamp("1947-12-28 02:45:40.547").unwrap();
        let first_lab = parse_timestamp("2019-01-01 00:00:00.000").unwrap();
        assert_eq!(coarse_years_between(dob, first_lab), 71);
    }
}
