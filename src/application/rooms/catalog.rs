//! Cached room catalog
//!
//! Rooms change rarely (seeding, admin provisioning), so the list is kept
//! in memory and reloaded only when empty, invalidated, or explicitly
//! refreshed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::{DomainError, DomainResult, NewRoom, RepositoryProvider, Room};

/// Admin request to provision a room
#[derive(Debug, Clone)]
pub struct RoomRequest {
    pub name: String,
    pub capacity: i32,
    pub equipment: Option<String>,
}

impl RoomRequest {
    pub fn validate(&self) -> DomainResult<NewRoom> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("room name is required".into()));
        }
        if self.capacity <= 0 {
            return Err(DomainError::Validation(
                "capacity must be a positive integer".into(),
            ));
        }
        let equipment = self.equipment.as_deref().unwrap_or_default().trim();
        Ok(NewRoom::new(name, self.capacity, equipment))
    }
}

#[derive(Default)]
struct CacheState {
    rooms: Option<Vec<Room>>,
    last_fetched: Option<DateTime<Utc>>,
}

pub struct RoomCatalog {
    repos: Arc<dyn RepositoryProvider>,
    cache: RwLock<CacheState>,
}

impl RoomCatalog {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            cache: RwLock::new(CacheState::default()),
        }
    }

    /// All rooms ordered by id, loading from storage on a cold cache
    pub async fn rooms(&self) -> DomainResult<Vec<Room>> {
        if let Some(rooms) = self.cache.read().await.rooms.as_ref() {
            return Ok(rooms.clone());
        }
        self.refresh().await
    }

    /// Reload from storage unconditionally
    pub async fn refresh(&self) -> DomainResult<Vec<Room>> {
        let mut cache = self.cache.write().await;
        let rooms = self.repos.rooms().find_all().await?;
        cache.rooms = Some(rooms.clone());
        cache.last_fetched = Some(Utc::now());
        debug!(count = rooms.len(), "Room catalog refreshed");
        Ok(rooms)
    }

    /// Drop the cached list; the next read reloads it
    pub async fn invalidate(&self) {
        let mut cache = self.cache.write().await;
        cache.rooms = None;
    }

    /// When the cached list was last loaded from storage
    pub async fn last_fetched(&self) -> Option<DateTime<Utc>> {
        self.cache.read().await.last_fetched
    }

    /// One room by id. Falls through to storage when the cache does not
    /// know it, so rooms provisioned by another process are still found.
    pub async fn find(&self, id: i32) -> DomainResult<Option<Room>> {
        if let Some(rooms) = self.cache.read().await.rooms.as_ref() {
            if let Some(room) = rooms.iter().find(|r| r.id == id) {
                return Ok(Some(room.clone()));
            }
        }

        let room = self.repos.rooms().find_by_id(id).await?;
        if room.is_some() {
            self.invalidate().await;
        }
        Ok(room)
    }

    /// Like `find`, but a missing room is `NotFound`
    pub async fn get(&self, id: i32) -> DomainResult<Room> {
        self.find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room", id))
    }

    pub async fn create(&self, request: RoomRequest) -> DomainResult<Room> {
        let new_room = request.validate()?;
        let room = self.repos.rooms().insert(new_room).await?;
        self.invalidate().await;
        info!(room_id = room.id, name = %room.name, "Room provisioned");
        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn catalog() -> (Arc<InMemoryRepositoryProvider>, RoomCatalog) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let catalog = RoomCatalog::new(repos.clone());
        (repos, catalog)
    }

    #[tokio::test]
    async fn cold_cache_loads_from_storage() {
        let (repos, catalog) = catalog();
        repos.rooms().insert(NewRoom::new("Salle A", 10, "")).await.unwrap();

        assert!(catalog.last_fetched().await.is_none());
        assert_eq!(catalog.rooms().await.unwrap().len(), 1);
        assert!(catalog.last_fetched().await.is_some());
    }

    #[tokio::test]
    async fn cached_list_is_stale_until_refresh() {
        let (repos, catalog) = catalog();
        repos.rooms().insert(NewRoom::new("Salle A", 10, "")).await.unwrap();
        catalog.rooms().await.unwrap();

        repos.rooms().insert(NewRoom::new("Salle B", 20, "")).await.unwrap();
        assert_eq!(catalog.rooms().await.unwrap().len(), 1);

        assert_eq!(catalog.refresh().await.unwrap().len(), 2);
        assert_eq!(catalog.rooms().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_reload() {
        let (repos, catalog) = catalog();
        catalog.rooms().await.unwrap();
        repos.rooms().insert(NewRoom::new("Salle A", 10, "")).await.unwrap();

        catalog.invalidate().await;
        assert_eq!(catalog.rooms().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn find_falls_through_to_storage() {
        let (repos, catalog) = catalog();
        catalog.rooms().await.unwrap();
        let room = repos.rooms().insert(NewRoom::new("Salle A", 10, "")).await.unwrap();

        assert_eq!(catalog.find(room.id).await.unwrap(), Some(room));
        assert!(catalog.find(99).await.unwrap().is_none());
        assert!(matches!(
            catalog.get(99).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn create_validates_and_invalidates() {
        let (_, catalog) = catalog();
        assert!(catalog.rooms().await.unwrap().is_empty());

        let room = catalog
            .create(RoomRequest {
                name: " Salle E ".into(),
                capacity: 8,
                equipment: None,
            })
            .await
            .unwrap();
        assert_eq!(room.name, "Salle E");
        assert_eq!(catalog.rooms().await.unwrap(), vec![room]);

        let err = catalog
            .create(RoomRequest {
                name: "Salle F".into(),
                capacity: 0,
                equipment: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
