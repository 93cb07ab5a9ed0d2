//! Reservation aggregate
//!
//! Contains the Reservation entity, the draft used for inserts, and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{NewReservation, Reservation};
pub use repository::ReservationRepository;
