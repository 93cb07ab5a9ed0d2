//! SeaORM implementation of RoomRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryOrder, Set,
};

use super::db_err;
use crate::domain::{DomainResult, NewRoom, Room, RoomRepository};
use crate::infrastructure::database::entities::room;

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: room::Model) -> Room {
    Room {
        id: m.id,
        name: m.name,
        capacity: m.capacity,
        equipment: m.equipment,
    }
}

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Room>> {
        let models = room::Entity::find()
            .order_by_asc(room::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn insert(&self, r: NewRoom) -> DomainResult<Room> {
        debug!("Inserting room: {}", r.name);

        let model = room::ActiveModel {
            id: NotSet,
            name: Set(r.name),
            capacity: Set(r.capacity),
            equipment: Set(r.equipment),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn count(&self) -> DomainResult<u64> {
        room::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
