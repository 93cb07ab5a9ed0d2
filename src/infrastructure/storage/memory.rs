//! In-memory repositories for development and testing

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;

use crate::domain::{
    DomainError, DomainResult, NewReservation, NewRoom, NewUser, RepositoryProvider, Reservation,
    ReservationRepository, Room, RoomRepository, User, UserRepository,
};

pub struct InMemoryRoomRepository {
    rooms: DashMap<i32, Room>,
    counter: AtomicI32,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        Ok(self.rooms.get(&id).map(|r| r.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self.rooms.iter().map(|r| r.value().clone()).collect();
        rooms.sort_by_key(|r| r.id);
        Ok(rooms)
    }

    async fn insert(&self, room: NewRoom) -> DomainResult<Room> {
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        let room = room.into_room(id);
        self.rooms.insert(id, room.clone());
        Ok(room)
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.rooms.len() as u64)
    }
}

pub struct InMemoryReservationRepository {
    reservations: DashMap<i32, Reservation>,
    counter: AtomicI32,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self {
            reservations: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }

    fn collect_sorted(&self, keep: impl Fn(&Reservation) -> bool) -> Vec<Reservation> {
        let mut out: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|r| keep(r.value()))
            .map(|r| r.value().clone())
            .collect();
        out.sort_by(|a, b| (a.date, a.start, a.id).cmp(&(b.date, b.start, b.id)));
        out
    }
}

impl Default for InMemoryReservationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn insert(&self, reservation: NewReservation) -> DomainResult<Reservation> {
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        let reservation = reservation.into_reservation(id, Utc::now());
        self.reservations.insert(id, reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(&id).map(|r| r.clone()))
    }

    async fn update(&self, reservation: Reservation) -> DomainResult<Reservation> {
        let Some(mut stored) = self.reservations.get_mut(&reservation.id) else {
            return Err(DomainError::not_found("Reservation", reservation.id));
        };

        if stored.version != reservation.version {
            return Err(DomainError::Conflict(format!(
                "Reservation {} was modified concurrently",
                reservation.id
            )));
        }

        let mut updated = reservation;
        updated.version += 1;
        updated.created_at = stored.created_at;
        updated.updated_at = Utc::now();
        *stored = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.reservations
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Reservation", id))
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        Ok(self.collect_sorted(|_| true))
    }

    async fn find_by_date(&self, date: NaiveDate) -> DomainResult<Vec<Reservation>> {
        Ok(self.collect_sorted(|r| r.date == date))
    }

    async fn find_by_room_and_date(
        &self,
        room_id: i32,
        date: NaiveDate,
    ) -> DomainResult<Vec<Reservation>> {
        Ok(self.collect_sorted(|r| r.room_id == room_id && r.date == date))
    }
}

/// Users keyed by id
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_where(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        self.users
            .iter()
            .find(|u| pred(u.value()))
            .map(|u| u.value().clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> DomainResult<User> {
        if self
            .find_where(|u| u.username == user.username || u.email == user.email)
            .is_some()
        {
            return Err(DomainError::Conflict(
                "Username or email already exists".to_string(),
            ));
        }
        let user = user.into_user(uuid::Uuid::new_v4().to_string(), Utc::now());
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        Ok(self.find_where(|u| u.username == username))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self.find_where(|u| u.email == email))
    }

    async fn record_login(&self, id: &str) -> DomainResult<()> {
        let mut user = self
            .users
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found("User", id))?;
        let now = Utc::now();
        user.last_login_at = Some(now);
        user.updated_at = now;
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.len() as u64)
    }
}

/// In-memory `RepositoryProvider`
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    rooms: InMemoryRoomRepository,
    reservations: InMemoryReservationRepository,
    users: InMemoryUserRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn draft(room_id: i32, day: u32, h: u32) -> NewReservation {
        NewReservation {
            title: "Sync".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            start: NaiveTime::from_hms_opt(h, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(h + 1, 0, 0).unwrap(),
            description: Some("weekly".into()),
            room_id,
        }
    }

    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let repo = InMemoryReservationRepository::new();
        let created = repo.insert(draft(1, 1, 9)).await.unwrap();
        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn stale_version_is_rejected() {
        let repo = InMemoryReservationRepository::new();
        let created = repo.insert(draft(1, 1, 9)).await.unwrap();

        let mut first = created.clone();
        first.title = "first".into();
        let saved = repo.update(first).await.unwrap();
        assert_eq!(saved.version, 2);

        let mut stale = created;
        stale.title = "stale".into();
        let err = repo.update(stale).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let stored = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "first");
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let repo = InMemoryReservationRepository::new();
        let created = repo.insert(draft(1, 1, 9)).await.unwrap();
        repo.delete(created.id).await.unwrap();
        let err = repo.delete(created.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn filters_by_room_and_date() {
        let repo = InMemoryReservationRepository::new();
        repo.insert(draft(1, 1, 11)).await.unwrap();
        repo.insert(draft(1, 1, 9)).await.unwrap();
        repo.insert(draft(2, 1, 9)).await.unwrap();
        repo.insert(draft(1, 2, 9)).await.unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let room_day = repo.find_by_room_and_date(1, day).await.unwrap();
        assert_eq!(room_day.len(), 2);
        assert!(room_day[0].start < room_day[1].start);

        assert_eq!(repo.find_by_date(day).await.unwrap().len(), 3);
        assert_eq!(repo.find_all().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn rooms_get_sequential_ids() {
        let repo = InMemoryRoomRepository::new();
        let a = repo.insert(NewRoom::new("A", 2, "")).await.unwrap();
        let b = repo.insert(NewRoom::new("B", 3, "")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(repo.count().await.unwrap(), 2);
        assert_eq!(repo.find_all().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn users_are_unique_by_username_and_email() {
        let repo = InMemoryUserRepository::new();
        let new_user = |name: &str, email: &str| NewUser {
            username: name.into(),
            email: email.into(),
            full_name: None,
            password_hash: "x".into(),
            role: Default::default(),
        };

        let ada = repo.insert(new_user("ada", "ada@example.com")).await.unwrap();
        assert!(repo.insert(new_user("ada", "b@example.com")).await.is_err());
        assert!(repo.insert(new_user("bob", "ada@example.com")).await.is_err());

        repo.record_login(&ada.id).await.unwrap();
        let found = repo.find_by_username("ada").await.unwrap().unwrap();
        assert!(found.last_login_at.is_some());
    }
}
