//! Profile of the signed-in user

pub mod handlers;

pub use handlers::*;
