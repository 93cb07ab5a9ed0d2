//! Room repository interface

use async_trait::async_trait;

use super::model::{NewRoom, Room};
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Find room by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>>;

    /// All rooms ordered by ID
    async fn find_all(&self) -> DomainResult<Vec<Room>>;

    /// Provision a room, returning it with its assigned ID
    async fn insert(&self, room: NewRoom) -> DomainResult<Room>;

    async fn count(&self) -> DomainResult<u64>;
}
