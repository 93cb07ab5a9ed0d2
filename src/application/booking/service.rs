//! Booking service
//!
//! HTTP handlers stay thin and delegate here. Every write goes through
//! validate → room lookup → lock → availability check → persist.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::{info, warn};

use super::locks::RoomLocks;
use super::request::{AvailabilityRequest, BookingRequest, ReservationFilter};
use crate::application::rooms::RoomCatalog;
use crate::domain::{
    available_rooms, conflicting_reservations, AvailabilityQuery, DomainError, DomainResult,
    RepositoryProvider, Reservation, Room,
};
use crate::shared::time::format_time;

/// Answer to "can this slot be booked?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityReport {
    pub available: bool,
    pub conflicts: Vec<Reservation>,
}

impl AvailabilityReport {
    fn from_conflicts(conflicts: Vec<Reservation>) -> Self {
        Self {
            available: conflicts.is_empty(),
            conflicts,
        }
    }
}

/// Counters for the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingSummary {
    pub rooms: usize,
    pub reservations: usize,
    pub reservations_on_date: usize,
}

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    catalog: Arc<RoomCatalog>,
    locks: RoomLocks,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, catalog: Arc<RoomCatalog>) -> Self {
        Self {
            repos,
            catalog,
            locks: RoomLocks::new(),
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get(&self, id: i32) -> DomainResult<Reservation> {
        self.repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", id))
    }

    /// Reservations ordered by date and start time, optionally narrowed
    pub async fn list(&self, filter: ReservationFilter) -> DomainResult<Vec<Reservation>> {
        let reservations = self.repos.reservations();
        match (filter.date, filter.room_id) {
            (Some(date), Some(room_id)) => reservations.find_by_room_and_date(room_id, date).await,
            (Some(date), None) => reservations.find_by_date(date).await,
            (None, Some(room_id)) => Ok(reservations
                .find_all()
                .await?
                .into_iter()
                .filter(|r| r.room_id == room_id)
                .collect()),
            (None, None) => reservations.find_all().await,
        }
    }

    /// Availability of one room, without writing anything
    pub async fn check_availability(
        &self,
        request: AvailabilityRequest,
    ) -> DomainResult<AvailabilityReport> {
        let query = request.validate()?;
        self.catalog.get(query.room_id).await?;
        let conflicts = self.conflicts_for(&query).await?;
        Ok(AvailabilityReport::from_conflicts(conflicts))
    }

    /// Rooms free for the whole slot, in catalog order
    pub async fn available_rooms(
        &self,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> DomainResult<Vec<Room>> {
        if start >= end {
            return Err(DomainError::Validation(
                "start time must be before end time".into(),
            ));
        }
        let rooms = self.catalog.rooms().await?;
        let reservations = self.repos.reservations().find_by_date(date).await?;
        Ok(available_rooms(date, start, end, &rooms, &reservations))
    }

    /// Room and reservation counts, with the bookings on `date`
    pub async fn summary(&self, date: NaiveDate) -> DomainResult<BookingSummary> {
        let rooms = self.catalog.rooms().await?.len();
        let all = self.repos.reservations().find_all().await?;
        let reservations_on_date = all.iter().filter(|r| r.date == date).count();
        Ok(BookingSummary {
            rooms,
            reservations: all.len(),
            reservations_on_date,
        })
    }

    // ── Commands ────────────────────────────────────────────────

    pub async fn create(&self, request: BookingRequest) -> DomainResult<Reservation> {
        let result = self.try_create(request).await;
        record_outcome(&result, "created");
        result
    }

    async fn try_create(&self, request: BookingRequest) -> DomainResult<Reservation> {
        let draft = request.validate()?;
        self.catalog.get(draft.room_id).await?;

        let _guard = self.locks.acquire(draft.room_id).await;

        let query = AvailabilityQuery::new(draft.room_id, draft.date, draft.start, draft.end);
        let conflicts = self.conflicts_for(&query).await?;
        if !conflicts.is_empty() {
            return Err(slot_taken(&conflicts));
        }

        let reservation = self.repos.reservations().insert(draft).await?;
        info!(
            reservation_id = reservation.id,
            room_id = reservation.room_id,
            date = %reservation.date,
            "Reservation created"
        );
        Ok(reservation)
    }

    /// Replace a reservation's editable fields.
    ///
    /// `expected_version`, when given, must match the stored version. The
    /// reservation never conflicts with its own previous slot.
    pub async fn update(
        &self,
        id: i32,
        request: BookingRequest,
        expected_version: Option<i32>,
    ) -> DomainResult<Reservation> {
        let result = self.try_update(id, request, expected_version).await;
        record_outcome(&result, "updated");
        result
    }

    async fn try_update(
        &self,
        id: i32,
        request: BookingRequest,
        expected_version: Option<i32>,
    ) -> DomainResult<Reservation> {
        let draft = request.validate()?;
        let current = self.get(id).await?;
        self.catalog.get(draft.room_id).await?;

        if let Some(version) = expected_version {
            if version != current.version {
                return Err(DomainError::Conflict(format!(
                    "reservation {} was modified (version {} != {})",
                    id, version, current.version
                )));
            }
        }

        // Moving between rooms holds both rooms.
        let _guards = self
            .locks
            .acquire_all(&[current.room_id, draft.room_id])
            .await;

        let query = AvailabilityQuery::new(draft.room_id, draft.date, draft.start, draft.end)
            .excluding(id);
        let conflicts = self.conflicts_for(&query).await?;
        if !conflicts.is_empty() {
            return Err(slot_taken(&conflicts));
        }

        let mut updated = current;
        updated.apply(draft);
        let saved = self.repos.reservations().update(updated).await?;
        info!(
            reservation_id = saved.id,
            room_id = saved.room_id,
            version = saved.version,
            "Reservation updated"
        );
        Ok(saved)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = self.try_delete(id).await;
        record_outcome(&result, "cancelled");
        result
    }

    async fn try_delete(&self, id: i32) -> DomainResult<()> {
        let current = self.get(id).await?;
        let _guard = self.locks.acquire(current.room_id).await;
        self.repos.reservations().delete(id).await?;
        info!(reservation_id = id, room_id = current.room_id, "Reservation cancelled");
        Ok(())
    }

    async fn conflicts_for(&self, query: &AvailabilityQuery) -> DomainResult<Vec<Reservation>> {
        let existing = self
            .repos
            .reservations()
            .find_by_room_and_date(query.room_id, query.date)
            .await?;
        Ok(conflicting_reservations(query, &existing))
    }
}

fn slot_taken(conflicts: &[Reservation]) -> DomainError {
    let slots: Vec<String> = conflicts
        .iter()
        .map(|r| format!("#{} {}-{}", r.id, format_time(r.start), format_time(r.end)))
        .collect();
    DomainError::Conflict(format!(
        "room is already booked for this slot ({})",
        slots.join(", ")
    ))
}

fn record_outcome<T>(result: &DomainResult<T>, success: &'static str) {
    let outcome = match result {
        Ok(_) => success,
        Err(DomainError::Conflict(_)) => "conflict",
        Err(DomainError::Validation(_)) => "rejected",
        Err(DomainError::NotFound { .. }) => "not_found",
        Err(e) => {
            warn!(error = %e, "Booking operation failed");
            "error"
        }
    };
    metrics::counter!("bookings_total", "outcome" => outcome).increment(1);
}
