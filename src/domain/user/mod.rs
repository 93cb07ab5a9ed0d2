//! User aggregate
//!
//! Accounts that may authenticate against the API. Roles gate room
//! provisioning and the admin dashboard.

pub mod model;
pub mod repository;

pub use model::{NewUser, User, UserRole};
pub use repository::UserRepository;
