//! User repository interface

use async_trait::async_trait;

use super::model::{NewUser, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create an account. Duplicate username or email yields `Conflict`.
    async fn insert(&self, user: NewUser) -> DomainResult<User>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Stamp `last_login_at` with the current time
    async fn record_login(&self, id: &str) -> DomainResult<()>;

    async fn count(&self) -> DomainResult<u64>;
}
