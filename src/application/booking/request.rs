//! Booking request validation
//!
//! Requests arrive with dates and times as strings. Validation parses and
//! normalizes them and stops at the first violation, before any storage or
//! availability work happens.

use chrono::{NaiveDate, NaiveTime};

use crate::domain::{AvailabilityQuery, DomainError, DomainResult, NewReservation};
use crate::shared::time::{parse_date, parse_time};

pub const MAX_TITLE_LEN: usize = 200;

/// A reservation as submitted by a client
#[derive(Debug, Clone, Default)]
pub struct BookingRequest {
    pub title: String,
    /// `YYYY-MM-DD` or an ISO-8601 date-time
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`
    pub start: String,
    pub end: String,
    pub description: Option<String>,
    pub room_id: i32,
}

impl BookingRequest {
    /// Shape checks only. Room existence and availability are checked by
    /// `BookingService`.
    pub fn validate(&self) -> DomainResult<NewReservation> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DomainError::Validation("title is required".into()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::Validation(format!(
                "title must be at most {} characters",
                MAX_TITLE_LEN
            )));
        }
        if self.room_id <= 0 {
            return Err(DomainError::Validation(
                "room_id must be a positive integer".into(),
            ));
        }

        let date = parse_date(&self.date)?;
        let (start, end) = parse_slot(&self.start, &self.end)?;

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(NewReservation {
            title: title.to_string(),
            date,
            start,
            end,
            description,
            room_id: self.room_id,
        })
    }
}

/// An availability question as submitted by a client
#[derive(Debug, Clone, Default)]
pub struct AvailabilityRequest {
    pub room_id: i32,
    pub date: String,
    pub start: String,
    pub end: String,
    pub exclude_id: Option<i32>,
}

impl AvailabilityRequest {
    pub fn validate(&self) -> DomainResult<AvailabilityQuery> {
        if self.room_id <= 0 {
            return Err(DomainError::Validation(
                "room_id must be a positive integer".into(),
            ));
        }
        let date = parse_date(&self.date)?;
        let (start, end) = parse_slot(&self.start, &self.end)?;

        let query = AvailabilityQuery::new(self.room_id, date, start, end);
        Ok(match self.exclude_id {
            Some(id) => query.excluding(id),
            None => query,
        })
    }
}

/// Parse a `[start, end)` pair, rejecting empty and inverted slots
pub fn parse_slot(start: &str, end: &str) -> DomainResult<(NaiveTime, NaiveTime)> {
    let start = parse_time(start)?;
    let end = parse_time(end)?;
    if start >= end {
        return Err(DomainError::Validation(
            "start time must be before end time".into(),
        ));
    }
    Ok((start, end))
}

/// Optional filters for listing reservations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    pub date: Option<NaiveDate>,
    pub room_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BookingRequest {
        BookingRequest {
            title: "  Sprint review ".into(),
            date: "2024-01-15".into(),
            start: "09:00".into(),
            end: "10:30".into(),
            description: Some("   ".into()),
            room_id: 1,
        }
    }

    fn is_validation<T: std::fmt::Debug>(r: DomainResult<T>) -> bool {
        matches!(r, Err(DomainError::Validation(_)))
    }

    #[test]
    fn valid_request_is_normalized() {
        let draft = request().validate().unwrap();
        assert_eq!(draft.title, "Sprint review");
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(draft.start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(draft.end, NaiveTime::from_hms_opt(10, 30, 0).unwrap());
        assert_eq!(draft.description, None);
    }

    #[test]
    fn iso_datetime_date_keeps_calendar_day() {
        let mut req = request();
        req.date = "2024-01-15T23:00:00+05:00".into();
        assert_eq!(
            req.validate().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut req = request();
        req.title = "   ".into();
        assert!(is_validation(req.validate()));
    }

    #[test]
    fn long_title_is_rejected() {
        let mut req = request();
        req.title = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(is_validation(req.validate()));

        req.title = "é".repeat(MAX_TITLE_LEN);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn non_positive_room_is_rejected() {
        let mut req = request();
        req.room_id = 0;
        assert!(is_validation(req.validate()));
    }

    #[test]
    fn empty_and_inverted_slots_are_rejected() {
        let mut req = request();
        req.end = "09:00".into();
        assert!(is_validation(req.validate()));

        req.end = "08:00".into();
        assert!(is_validation(req.validate()));
    }

    #[test]
    fn malformed_values_are_rejected() {
        let mut req = request();
        req.date = "15/01/2024".into();
        assert!(is_validation(req.validate()));

        let mut req = request();
        req.start = "9am".into();
        assert!(is_validation(req.validate()));
    }

    #[test]
    fn availability_request_carries_exclusion() {
        let req = AvailabilityRequest {
            room_id: 2,
            date: "2024-01-15".into(),
            start: "09:00".into(),
            end: "10:00:00".into(),
            exclude_id: Some(7),
        };
        let query = req.validate().unwrap();
        assert_eq!(query.room_id, 2);
        assert_eq!(query.exclude_id, Some(7));

        let bad = AvailabilityRequest {
            end: "09:00".into(),
            ..req
        };
        assert!(is_validation(bad.validate()));
    }
}
