//! Room catalog

pub mod catalog;

pub use catalog::{RoomCatalog, RoomRequest};
