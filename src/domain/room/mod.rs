//! Room aggregate
//!
//! Rooms are provisioned up front (seed or admin) and never deleted.

pub mod model;
pub mod repository;

pub use model::{NewRoom, Room};
pub use repository::RoomRepository;
