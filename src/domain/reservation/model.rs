//! Reservation domain entity

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// A booked slot `[start, end)` in one room on one calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// Unique reservation ID, assigned by storage
    pub id: i32,
    pub title: String,
    /// Calendar day, no time component
    pub date: NaiveDate,
    /// Local time of day, inclusive
    pub start: NaiveTime,
    /// Local time of day, exclusive
    pub end: NaiveTime,
    pub description: Option<String>,
    pub room_id: i32,
    /// Optimistic concurrency counter, bumped on every update
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Length of the slot in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Overwrite the editable fields from a draft, keeping identity and audit data.
    pub fn apply(&mut self, draft: NewReservation) {
        self.title = draft.title;
        self.date = draft.date;
        self.start = draft.start;
        self.end = draft.end;
        self.description = draft.description;
        self.room_id = draft.room_id;
    }
}

/// Validated reservation data that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub title: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub description: Option<String>,
    pub room_id: i32,
}

impl NewReservation {
    /// Materialize with a storage-assigned id
    pub fn into_reservation(self, id: i32, now: DateTime<Utc>) -> Reservation {
        Reservation {
            id,
            title: self.title,
            date: self.date,
            start: self.start,
            end: self.end,
            description: self.description,
            room_id: self.room_id,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewReservation {
        NewReservation {
            title: "Standup".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(9, 45, 0).unwrap(),
            description: None,
            room_id: 1,
        }
    }

    #[test]
    fn into_reservation_starts_at_version_one() {
        let now = Utc::now();
        let r = draft().into_reservation(5, now);
        assert_eq!(r.id, 5);
        assert_eq!(r.version, 1);
        assert_eq!(r.created_at, now);
        assert_eq!(r.duration_minutes(), 45);
    }

    #[test]
    fn apply_keeps_identity() {
        let mut r = draft().into_reservation(5, Utc::now());
        let mut edit = draft();
        edit.title = "Retro".into();
        edit.room_id = 3;
        edit.description = Some("sprint 12".into());
        r.apply(edit);

        assert_eq!(r.id, 5);
        assert_eq!(r.version, 1);
        assert_eq!(r.title, "Retro");
        assert_eq!(r.room_id, 3);
        assert_eq!(r.description.as_deref(), Some("sprint 12"));
    }
}
