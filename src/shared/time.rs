//! Date and time-of-day normalization
//!
//! Reservations carry naive local values: a calendar date and two
//! times of day. Clients send them as strings in a few shapes, so every
//! entry point funnels through these helpers before anything is compared.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use super::errors::DomainError;

const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S"];

/// Naive date-times, with `T` or a space between date and time
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, an RFC 3339 date-time, or a naive date-time
/// (`YYYY-MM-DDTHH:MM[:SS[.fff]]`, with `T` or a space as separator). For
/// date-times only the calendar day is kept, as written, so
/// `2024-01-01T23:30:00+02:00` is 2024-01-01.
pub fn parse_date(input: &str) -> Result<NaiveDate, DomainError> {
    let s = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Ok(dt.date());
    }

    Err(DomainError::Validation(format!(
        "invalid date '{}', expected YYYY-MM-DD",
        input
    )))
}

/// Parse a local time of day (`HH:MM` or `HH:MM:SS`).
pub fn parse_time(input: &str) -> Result<NaiveTime, DomainError> {
    let s = input.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| {
            DomainError::Validation(format!("invalid time '{}', expected HH:MM", input))
        })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Times go back out as `HH:MM`, seconds only when present.
pub fn format_time(time: NaiveTime) -> String {
    use chrono::Timelike;
    if time.second() == 0 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_date() {
        let d = parse_date("2024-01-02").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn datetime_keeps_calendar_day() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(parse_date("2024-01-01T23:30:00+02:00").unwrap(), expected);
        assert_eq!(parse_date("2024-01-01T00:00:00Z").unwrap(), expected);
        assert_eq!(parse_date("2024-01-01T08:15:00").unwrap(), expected);
        assert_eq!(parse_date("2024-01-01T08:15:00.000").unwrap(), expected);
        assert_eq!(parse_date("2024-01-01T08:15").unwrap(), expected);
        assert_eq!(parse_date("2024-01-01 08:15:00").unwrap(), expected);
        assert_eq!(parse_date("2024-01-01 08:15").unwrap(), expected);
    }

    #[test]
    fn bad_dates_are_validation_errors() {
        for s in ["", "01/02/2024", "2024-13-01", "tomorrow"] {
            assert!(matches!(parse_date(s), Err(DomainError::Validation(_))), "{s}");
        }
    }

    #[test]
    fn times_with_and_without_seconds() {
        assert_eq!(
            parse_time("09:00").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time(" 17:45:30 ").unwrap(),
            NaiveTime::from_hms_opt(17, 45, 30).unwrap()
        );
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("9h").is_err());
    }

    #[test]
    fn formatting() {
        assert_eq!(format_time(NaiveTime::from_hms_opt(9, 5, 0).unwrap()), "09:05");
        assert_eq!(format_time(NaiveTime::from_hms_opt(9, 5, 7).unwrap()), "09:05:07");
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()),
            "2024-03-09"
        );
    }
}
