pub mod admin;
pub mod auth;
pub mod availability;
pub mod health;
pub mod metrics;
pub mod request_id;
pub mod reservations;
pub mod rooms;
pub mod settings;
pub mod users;
