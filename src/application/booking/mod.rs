//! Booking: reservation lifecycle
//!
//! Raw requests are validated into domain drafts, checked against the
//! availability engine under a per-room lock, then persisted.

pub mod locks;
pub mod request;
pub mod service;

pub use locks::RoomLocks;
pub use request::{AvailabilityRequest, BookingRequest, ReservationFilter, MAX_TITLE_LEN};
pub use service::{AvailabilityReport, BookingService, BookingSummary};
