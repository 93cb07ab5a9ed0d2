//! Public application settings

pub mod handlers;

pub use handlers::*;
