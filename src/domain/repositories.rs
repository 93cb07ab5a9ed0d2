//! Repository traits for the domain layer
//!
//! - `RepositoryProvider`: unified access to the per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::reservation::ReservationRepository;
use super::room::RoomRepository;
use super::user::UserRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let room = repos.rooms().find_by_id(1).await?;
///     let day = repos.reservations().find_by_room_and_date(1, date).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn rooms(&self) -> &dyn RoomRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn users(&self) -> &dyn UserRepository;
}
