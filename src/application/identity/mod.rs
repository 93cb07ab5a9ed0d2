//! Identity: accounts and authentication
//!
//! `IdentityService` handles registration, login, profile lookup and the
//! bootstrap admin account.

pub mod service;

pub use service::{AuthResult, IdentityService, RegisterRequest};
