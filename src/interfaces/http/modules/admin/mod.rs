//! Admin-only endpoints

pub mod handlers;

pub use handlers::*;
