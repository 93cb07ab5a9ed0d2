//! Domain layer: entities, repository interfaces and the availability engine

pub mod availability;
pub mod repositories;
pub mod reservation;
pub mod room;
pub mod user;

pub use availability::{
    available_rooms, conflicting_reservations, is_available, overlaps, AvailabilityQuery,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use reservation::{NewReservation, Reservation, ReservationRepository};
pub use room::{NewRoom, Room, RoomRepository};
pub use user::{NewUser, User, UserRepository, UserRole};

pub use crate::shared::errors::DomainError;
