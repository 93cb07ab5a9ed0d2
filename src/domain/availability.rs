//! Availability engine
//!
//! Pure decision logic over reservations that are already in memory. Nothing
//! here performs I/O or keeps state, so every function is safe to call from
//! any number of request handlers at once.
//!
//! Slots are half-open intervals `[start, end)`: a booking ending at 10:00
//! and another starting at 10:00 do not overlap. Dates are compared at
//! calendar-day granularity.
//!
//! The engine filters by room and date itself, so it gives the right answer
//! for an unfiltered reservation list. Callers should still pre-filter by
//! room and date (see `ReservationRepository::find_by_room_and_date`) to keep
//! the scan small.

use chrono::{NaiveDate, NaiveTime};

use super::reservation::Reservation;
use super::room::Room;

/// A proposed booking, checked but never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub room_id: i32,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Reservation being edited; it never conflicts with itself
    pub exclude_id: Option<i32>,
}

impl AvailabilityQuery {
    pub fn new(room_id: i32, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            room_id,
            date,
            start,
            end,
            exclude_id: None,
        }
    }

    pub fn excluding(mut self, reservation_id: i32) -> Self {
        self.exclude_id = Some(reservation_id);
        self
    }
}

/// Half-open overlap between `[start, end)` and `[other_start, other_end)`.
///
/// Strict at the touching boundary, inclusive on the containment side.
/// An empty or inverted interval on either side overlaps nothing.
pub fn overlaps(
    start: NaiveTime,
    end: NaiveTime,
    other_start: NaiveTime,
    other_end: NaiveTime,
) -> bool {
    if start >= end || other_start >= other_end {
        return false;
    }

    (start >= other_start && start < other_end)
        || (end > other_start && end <= other_end)
        || (start <= other_start && end >= other_end)
}

/// Whether `reservation` blocks `query`
pub fn conflicts_with(query: &AvailabilityQuery, reservation: &Reservation) -> bool {
    if query.exclude_id == Some(reservation.id) {
        return false;
    }
    if reservation.room_id != query.room_id {
        return false;
    }
    // NaiveDate carries no time component, so equality is day equality.
    if reservation.date != query.date {
        return false;
    }

    overlaps(query.start, query.end, reservation.start, reservation.end)
}

/// `true` when no reservation in `existing` conflicts with `query`
pub fn is_available(query: &AvailabilityQuery, existing: &[Reservation]) -> bool {
    !existing.iter().any(|r| conflicts_with(query, r))
}

/// Every reservation that conflicts with `query`, in input order.
///
/// An empty result means the slot is available.
pub fn conflicting_reservations(
    query: &AvailabilityQuery,
    existing: &[Reservation],
) -> Vec<Reservation> {
    existing
        .iter()
        .filter(|r| conflicts_with(query, r))
        .cloned()
        .collect()
}

/// Rooms that are free for `[start, end)` on `date`, preserving room order
pub fn available_rooms(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    rooms: &[Room],
    reservations: &[Reservation],
) -> Vec<Room> {
    rooms
        .iter()
        .filter(|room| {
            let query = AvailabilityQuery::new(room.id, date, start, end);
            is_available(&query, reservations)
        })
        .cloned()
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation::NewReservation;
    use chrono::Utc;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn booking(id: i32, room_id: i32, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Reservation {
        NewReservation {
            title: format!("booking {id}"),
            date,
            start,
            end,
            description: None,
            room_id,
        }
        .into_reservation(id, Utc::now())
    }

    fn room(id: i32) -> Room {
        Room {
            id,
            name: format!("Salle {id}"),
            capacity: 10,
            equipment: String::new(),
        }
    }

    #[test]
    fn touching_intervals_do_not_conflict() {
        let existing = vec![booking(1, 1, day(1), t(9, 0), t(10, 0))];

        let after = AvailabilityQuery::new(1, day(1), t(10, 0), t(11, 0));
        let before = AvailabilityQuery::new(1, day(1), t(8, 0), t(9, 0));

        assert!(is_available(&after, &existing));
        assert!(is_available(&before, &existing));
    }

    #[test]
    fn containment_conflicts_both_ways() {
        let existing = vec![booking(1, 1, day(1), t(9, 0), t(12, 0))];
        let inside = AvailabilityQuery::new(1, day(1), t(10, 0), t(11, 0));
        assert!(!is_available(&inside, &existing));

        let existing = vec![booking(1, 1, day(1), t(10, 0), t(11, 0))];
        let around = AvailabilityQuery::new(1, day(1), t(9, 0), t(12, 0));
        assert!(!is_available(&around, &existing));
    }

    #[test]
    fn exact_match_conflicts() {
        let existing = vec![booking(1, 1, day(1), t(9, 0), t(10, 0))];
        let q = AvailabilityQuery::new(1, day(1), t(9, 0), t(10, 0));
        assert!(!is_available(&q, &existing));
    }

    #[test]
    fn partial_overlaps_conflict() {
        let existing = vec![booking(1, 1, day(1), t(9, 0), t(10, 0))];
        let tail = AvailabilityQuery::new(1, day(1), t(9, 30), t(10, 30));
        let head = AvailabilityQuery::new(1, day(1), t(8, 30), t(9, 1));
        assert!(!is_available(&tail, &existing));
        assert!(!is_available(&head, &existing));
    }

    #[test]
    fn different_dates_never_conflict() {
        let existing = vec![booking(1, 1, day(1), t(9, 0), t(10, 0))];
        let q = AvailabilityQuery::new(1, day(2), t(9, 0), t(10, 0));
        assert!(is_available(&q, &existing));
    }

    #[test]
    fn other_rooms_are_ignored() {
        let existing = vec![booking(1, 2, day(1), t(9, 0), t(10, 0))];
        let q = AvailabilityQuery::new(1, day(1), t(9, 0), t(10, 0));
        assert!(is_available(&q, &existing));
    }

    #[test]
    fn exclude_id_exempts_the_edited_reservation() {
        let existing = vec![booking(5, 1, day(1), t(9, 0), t(10, 0))];
        let moved = AvailabilityQuery::new(1, day(1), t(9, 30), t(10, 30));

        assert!(is_available(&moved.excluding(5), &existing));
        assert!(!is_available(&moved, &existing));
    }

    #[test]
    fn exclude_id_does_not_hide_other_conflicts() {
        let existing = vec![
            booking(5, 1, day(1), t(9, 0), t(10, 0)),
            booking(6, 1, day(1), t(10, 0), t(11, 0)),
        ];
        let moved = AvailabilityQuery::new(1, day(1), t(9, 30), t(10, 30)).excluding(5);

        let conflicts = conflicting_reservations(&moved, &existing);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].id, 6);
    }

    #[test]
    fn empty_interval_overlaps_nothing() {
        let existing = vec![booking(1, 1, day(1), t(9, 0), t(11, 0))];
        let q = AvailabilityQuery::new(1, day(1), t(10, 0), t(10, 0));
        assert!(is_available(&q, &existing));
        assert!(!overlaps(t(10, 0), t(10, 0), t(9, 0), t(11, 0)));
        assert!(!overlaps(t(9, 0), t(11, 0), t(10, 0), t(10, 0)));
    }

    #[test]
    fn inverted_interval_overlaps_nothing() {
        assert!(!overlaps(t(11, 0), t(9, 0), t(9, 0), t(11, 0)));
    }

    #[test]
    fn conflict_relation_is_symmetric() {
        let times = [t(8, 0), t(9, 0), t(9, 30), t(10, 0), t(11, 0), t(12, 0)];
        let mut intervals = Vec::new();
        for (i, s) in times.iter().enumerate() {
            for e in &times[i + 1..] {
                intervals.push((*s, *e));
            }
        }

        for &(a_start, a_end) in &intervals {
            for &(b_start, b_end) in &intervals {
                let a = booking(1, 1, day(1), a_start, a_end);
                let b = booking(2, 1, day(1), b_start, b_end);
                let qa = AvailabilityQuery::new(1, day(1), a_start, a_end);
                let qb = AvailabilityQuery::new(1, day(1), b_start, b_end);

                assert_eq!(
                    is_available(&qa, &[b]),
                    is_available(&qb, &[a]),
                    "[{a_start},{a_end}) vs [{b_start},{b_end})"
                );
                assert_eq!(
                    overlaps(a_start, a_end, b_start, b_end),
                    a_start < b_end && b_start < a_end
                );
            }
        }
    }

    #[test]
    fn conflicting_reservations_is_idempotent_and_ordered() {
        let existing = vec![
            booking(3, 1, day(1), t(11, 0), t(12, 0)),
            booking(1, 1, day(1), t(9, 0), t(10, 0)),
            booking(2, 1, day(2), t(9, 0), t(10, 0)),
            booking(4, 1, day(1), t(12, 0), t(13, 0)),
        ];
        let snapshot = existing.clone();
        let q = AvailabilityQuery::new(1, day(1), t(9, 30), t(11, 30));

        let first = conflicting_reservations(&q, &existing);
        let second = conflicting_reservations(&q, &existing);

        assert_eq!(first, second);
        assert_eq!(existing, snapshot);
        assert_eq!(first.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn no_conflicts_means_available() {
        let existing = vec![booking(1, 1, day(1), t(9, 0), t(10, 0))];
        let q = AvailabilityQuery::new(1, day(1), t(13, 0), t(14, 0));
        assert!(conflicting_reservations(&q, &existing).is_empty());
        assert!(is_available(&q, &existing));
    }

    #[test]
    fn available_rooms_preserves_order() {
        let rooms = vec![room(4), room(2), room(1), room(3)];
        let reservations = vec![
            booking(1, 2, day(1), t(9, 0), t(10, 0)),
            booking(2, 3, day(1), t(10, 0), t(11, 0)),
            booking(3, 1, day(2), t(9, 0), t(10, 0)),
        ];

        let free = available_rooms(day(1), t(9, 0), t(10, 0), &rooms, &reservations);
        assert_eq!(free.iter().map(|r| r.id).collect::<Vec<_>>(), vec![4, 1, 3]);
    }

    #[test]
    fn available_rooms_with_no_rooms() {
        assert!(available_rooms(day(1), t(9, 0), t(10, 0), &[], &[]).is_empty());
    }
}
