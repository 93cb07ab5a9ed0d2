//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::debug;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::db_err;
use crate::domain::{
    DomainError, DomainResult, NewReservation, Reservation, ReservationRepository,
};
use crate::infrastructure::database::entities::reservation;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        id: m.id,
        title: m.title,
        date: m.date,
        start: m.start_time,
        end: m.end_time,
        description: m.description,
        room_id: m.room_id,
        version: m.version,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn chronological(select: Select<reservation::Entity>) -> Select<reservation::Entity> {
    select
        .order_by_asc(reservation::Column::Date)
        .order_by_asc(reservation::Column::StartTime)
        .order_by_asc(reservation::Column::Id)
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn insert(&self, r: NewReservation) -> DomainResult<Reservation> {
        debug!("Inserting reservation '{}' for room {}", r.title, r.room_id);

        let now = Utc::now();
        let model = reservation::ActiveModel {
            id: NotSet,
            title: Set(r.title),
            date: Set(r.date),
            start_time: Set(r.start),
            end_time: Set(r.end),
            description: Set(r.description),
            room_id: Set(r.room_id),
            version: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, r: Reservation) -> DomainResult<Reservation> {
        debug!("Updating reservation {} (version {})", r.id, r.version);

        let result = reservation::Entity::update_many()
            .col_expr(reservation::Column::Title, Expr::value(r.title.clone()))
            .col_expr(reservation::Column::Date, Expr::value(r.date))
            .col_expr(reservation::Column::StartTime, Expr::value(r.start))
            .col_expr(reservation::Column::EndTime, Expr::value(r.end))
            .col_expr(
                reservation::Column::Description,
                Expr::value(r.description.clone()),
            )
            .col_expr(reservation::Column::RoomId, Expr::value(r.room_id))
            .col_expr(reservation::Column::Version, Expr::value(r.version + 1))
            .col_expr(reservation::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(reservation::Column::Id.eq(r.id))
            .filter(reservation::Column::Version.eq(r.version))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return match self.find_by_id(r.id).await? {
                None => Err(DomainError::not_found("Reservation", r.id)),
                Some(_) => Err(DomainError::Conflict(format!(
                    "Reservation {} was modified concurrently",
                    r.id
                ))),
            };
        }

        self.find_by_id(r.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", r.id))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting reservation {}", id);

        let result = reservation::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Reservation", id));
        }
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        let models = chronological(reservation::Entity::find())
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_date(&self, date: NaiveDate) -> DomainResult<Vec<Reservation>> {
        let models = chronological(
            reservation::Entity::find().filter(reservation::Column::Date.eq(date)),
        )
        .all(&self.db)
        .await
        .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_room_and_date(
        &self,
        room_id: i32,
        date: NaiveDate,
    ) -> DomainResult<Vec<Reservation>> {
        let models = chronological(
            reservation::Entity::find()
                .filter(reservation::Column::RoomId.eq(room_id))
                .filter(reservation::Column::Date.eq(date)),
        )
        .all(&self.db)
        .await
        .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewRoom, RoomRepository};
    use crate::infrastructure::database::repositories::room_repository::SeaOrmRoomRepository;
    use crate::infrastructure::database::test_database;
    use chrono::NaiveTime;

    async fn setup() -> (SeaOrmReservationRepository, i32) {
        let db = test_database().await;
        let room = SeaOrmRoomRepository::new(db.clone())
            .insert(NewRoom::new("Salle A", 10, "Projecteur"))
            .await
            .unwrap();
        (SeaOrmReservationRepository::new(db), room.id)
    }

    fn draft(room_id: i32, day: u32, from: (u32, u32), to: (u32, u32)) -> NewReservation {
        NewReservation {
            title: "Planning".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            start: NaiveTime::from_hms_opt(from.0, from.1, 0).unwrap(),
            end: NaiveTime::from_hms_opt(to.0, to.1, 0).unwrap(),
            description: Some("Q1".into()),
            room_id,
        }
    }

    #[tokio::test]
    async fn insert_then_find_by_id_round_trips() {
        let (repo, room_id) = setup().await;
        let input = draft(room_id, 1, (9, 0), (10, 30));
        let created = repo.insert(input.clone()).await.unwrap();
        let found = repo.find_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(found.id, created.id);
        assert_eq!(found.title, input.title);
        assert_eq!(found.date, input.date);
        assert_eq!(found.start, input.start);
        assert_eq!(found.end, input.end);
        assert_eq!(found.description, input.description);
        assert_eq!(found.room_id, input.room_id);
        assert_eq!(found.version, 1);
    }

    #[tokio::test]
    async fn room_and_date_filter() {
        let (repo, room_id) = setup().await;
        repo.insert(draft(room_id, 1, (14, 0), (15, 0))).await.unwrap();
        repo.insert(draft(room_id, 1, (9, 0), (10, 0))).await.unwrap();
        repo.insert(draft(room_id, 2, (9, 0), (10, 0))).await.unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let found = repo.find_by_room_and_date(room_id, day).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());

        assert!(repo
            .find_by_room_and_date(room_id + 1, day)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(repo.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_bumps_version_and_rejects_stale_writes() {
        let (repo, room_id) = setup().await;
        let created = repo.insert(draft(room_id, 1, (9, 0), (10, 0))).await.unwrap();

        let mut edit = created.clone();
        edit.title = "Renamed".into();
        edit.description = None;
        let updated = repo.update(edit).await.unwrap();
        assert_eq!(updated.version, 2);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description, None);

        let mut stale = created;
        stale.title = "Stale".into();
        let err = repo.update(stale).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let stored = repo.find_by_id(updated.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Renamed");
    }

    #[tokio::test]
    async fn update_and_delete_missing_are_not_found() {
        let (repo, room_id) = setup().await;
        let ghost = draft(room_id, 1, (9, 0), (10, 0)).into_reservation(999, Utc::now());

        assert!(matches!(
            repo.update(ghost).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
        assert!(matches!(
            repo.delete(999).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }
}
