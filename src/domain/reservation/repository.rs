//! Reservation repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{NewReservation, Reservation};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persist a new reservation and return it with its assigned ID
    async fn insert(&self, reservation: NewReservation) -> DomainResult<Reservation>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    /// Replace an existing reservation.
    ///
    /// `reservation.version` must match the stored version; on success the
    /// stored version is incremented and the updated row is returned.
    /// A mismatch yields `DomainError::Conflict`, a missing row `NotFound`.
    async fn update(&self, reservation: Reservation) -> DomainResult<Reservation>;

    /// Delete by ID; `NotFound` if there is nothing to delete
    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// All reservations ordered by date, then start time
    async fn find_all(&self) -> DomainResult<Vec<Reservation>>;

    /// All reservations on a calendar day, any room
    async fn find_by_date(&self, date: NaiveDate) -> DomainResult<Vec<Reservation>>;

    /// Reservations of one room on one calendar day
    async fn find_by_room_and_date(
        &self,
        room_id: i32,
        date: NaiveDate,
    ) -> DomainResult<Vec<Reservation>>;
}
