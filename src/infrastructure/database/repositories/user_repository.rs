//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use super::db_err;
use crate::domain::{DomainError, DomainResult, NewUser, User, UserRepository, UserRole};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::User => UserRole::User,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::User => user::UserRole::User,
    }
}

fn model_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        username: m.username,
        email: m.email,
        full_name: m.full_name,
        password_hash: m.password_hash,
        role: entity_role_to_domain(m.role),
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
        last_login_at: m.last_login_at,
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn insert(&self, u: NewUser) -> DomainResult<User> {
        debug!("Creating user: {}", u.username);

        let now = Utc::now();
        let model = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            username: Set(u.username),
            email: Set(u.email),
            full_name: Set(u.full_name),
            password_hash: Set(u.password_hash),
            role: Set(domain_role_to_entity(u.role)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
        };

        let saved = model.insert(&self.db).await.map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("duplicate") {
                DomainError::Conflict("Username or email already exists".to_string())
            } else {
                db_err(e)
            }
        })?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn record_login(&self, id: &str) -> DomainResult<()> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        let now = Utc::now();
        let mut active: user::ActiveModel = existing.into();
        active.last_login_at = Set(Some(now));
        active.updated_at = Set(now);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_database;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.into(),
            email: email.into(),
            full_name: Some("Ada Lovelace".into()),
            password_hash: "hash".into(),
            role: UserRole::User,
        }
    }

    #[tokio::test]
    async fn insert_and_lookup() {
        let repo = SeaOrmUserRepository::new(test_database().await);
        let created = repo.insert(new_user("ada", "ada@example.com")).await.unwrap();

        assert!(created.is_active);
        assert_eq!(
            repo.find_by_username("ada").await.unwrap().unwrap().id,
            created.id
        );
        assert_eq!(
            repo.find_by_email("ada@example.com").await.unwrap().unwrap().id,
            created.id
        );
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_username_is_conflict() {
        let repo = SeaOrmUserRepository::new(test_database().await);
        repo.insert(new_user("ada", "ada@example.com")).await.unwrap();

        let err = repo
            .insert(new_user("ada", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn record_login_stamps_time() {
        let repo = SeaOrmUserRepository::new(test_database().await);
        let created = repo.insert(new_user("ada", "ada@example.com")).await.unwrap();
        assert!(created.last_login_at.is_none());

        repo.record_login(&created.id).await.unwrap();
        let found = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert!(found.last_login_at.is_some());

        let err = repo.record_login("missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
