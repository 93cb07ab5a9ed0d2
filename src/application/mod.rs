//! Application layer: use-case orchestration over the domain

pub mod booking;
pub mod identity;
pub mod rooms;
pub mod services;

pub use booking::{
    AvailabilityReport, AvailabilityRequest, BookingRequest, BookingService, BookingSummary,
    ReservationFilter, RoomLocks,
};
pub use identity::{AuthResult, IdentityService, RegisterRequest};
pub use rooms::{RoomCatalog, RoomRequest};
pub use services::{HeartbeatConfig, HeartbeatWorker};
