//! # Room Booking Service
//!
//! REST service for booking meeting rooms by date and time slot, with a
//! half-open interval overlap engine that refuses double bookings.
//!
//! ## Architecture
//!
//! - **domain**: rooms, reservations, users, the availability engine and repository traits
//! - **application**: booking, room catalog and identity services, background worker
//! - **infrastructure**: SeaORM database, in-memory storage, JWT and bcrypt
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: runtime wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig, InMemoryRepositoryProvider};

pub use interfaces::http::create_api_router;
