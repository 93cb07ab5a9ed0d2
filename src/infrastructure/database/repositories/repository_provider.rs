//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{RepositoryProvider, ReservationRepository, RoomRepository, UserRepository};

use super::reservation_repository::SeaOrmReservationRepository;
use super::room_repository::SeaOrmRoomRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let room = repos.rooms().find_by_id(1).await?;
/// let day = repos.reservations().find_by_date(date).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    rooms: SeaOrmRoomRepository,
    reservations: SeaOrmReservationRepository,
    users: SeaOrmUserRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            rooms: SeaOrmRoomRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
}
