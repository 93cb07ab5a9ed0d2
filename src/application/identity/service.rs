//! Account management and authentication
//!
//! HTTP handlers are thin wrappers that delegate here.

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, NewUser, RepositoryProvider, User, UserRole};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

impl IdentityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by username or email and issue a bearer token.
    pub async fn login(&self, username_or_email: &str, password: &str) -> DomainResult<AuthResult> {
        let users = self.repos.users();
        let user = match users.find_by_username(username_or_email).await? {
            Some(user) => Some(user),
            None => users.find_by_email(username_or_email).await?,
        };

        let Some(user) = user else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = create_token(&user.id, &user.username, user.role.as_str(), &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        users.record_login(&user.id).await?;
        info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new account with the `user` role.
    pub async fn register(&self, request: RegisterRequest) -> DomainResult<User> {
        self.create_account(request, UserRole::User).await
    }

    async fn create_account(&self, request: RegisterRequest, role: UserRole) -> DomainResult<User> {
        let username = request.username.trim();
        let email = request.email.trim();

        if username.len() < 3 || username.len() > 50 {
            return Err(DomainError::Validation(
                "Username must be 3-50 characters".into(),
            ));
        }
        if request.password.len() < 8 {
            return Err(DomainError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }
        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }

        let users = self.repos.users();
        if users.find_by_username(username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".into()));
        }
        if users.find_by_email(email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".into()));
        }

        let password_hash = hash_password(&request.password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;

        let user = users
            .insert(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                full_name: request
                    .full_name
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty()),
                password_hash,
                role,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, role = %user.role, "New user registered");
        Ok(user)
    }

    /// Create the admin account when no user exists yet. Returns the new
    /// admin, or `None` when accounts are already present.
    pub async fn ensure_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<Option<User>> {
        if self.repos.users().count().await? > 0 {
            return Ok(None);
        }

        let admin = self
            .create_account(
                RegisterRequest {
                    username: username.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                    full_name: Some("Administrator".to_string()),
                },
                UserRole::Admin,
            )
            .await?;
        Ok(Some(admin))
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn profile(&self, user_id: &str) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))
    }

    pub async fn user_count(&self) -> DomainResult<u64> {
        self.repos.users().count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::jwt::verify_token;
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn service() -> IdentityService {
        IdentityService::new(
            Arc::new(InMemoryRepositoryProvider::new()),
            JwtConfig::default(),
        )
    }

    fn ada() -> RegisterRequest {
        RegisterRequest {
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: "correct horse".into(),
            full_name: Some(" Ada Lovelace ".into()),
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let svc = service();
        let user = svc.register(ada()).await.unwrap();
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.full_name.as_deref(), Some("Ada Lovelace"));

        let auth = svc.login("ada@example.com", "correct horse").await.unwrap();
        assert_eq!(auth.token_type, "Bearer");
        assert_eq!(auth.expires_in, 24 * 3600);

        let claims = verify_token(&auth.token, svc.jwt_config()).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, "user");

        let profile = svc.profile(&user.id).await.unwrap();
        assert!(profile.last_login_at.is_some());
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let svc = service();
        svc.register(ada()).await.unwrap();
        assert!(matches!(
            svc.login("ada", "nope nope").await,
            Err(DomainError::Unauthorized(_))
        ));
        assert!(matches!(
            svc.login("nobody", "correct horse").await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn registration_rules() {
        let svc = service();
        let mut short = ada();
        short.password = "short".into();
        assert!(matches!(svc.register(short).await, Err(DomainError::Validation(_))));

        let mut bad_email = ada();
        bad_email.email = "ada.example.com".into();
        assert!(matches!(svc.register(bad_email).await, Err(DomainError::Validation(_))));

        svc.register(ada()).await.unwrap();
        assert!(matches!(svc.register(ada()).await, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn admin_is_created_once() {
        let svc = service();
        let admin = svc
            .ensure_admin("admin", "admin@example.com", "Admin@123")
            .await
            .unwrap()
            .unwrap();
        assert!(admin.is_admin());

        let again = svc
            .ensure_admin("admin", "admin@example.com", "Admin@123")
            .await
            .unwrap();
        assert!(again.is_none());
        assert_eq!(svc.user_count().await.unwrap(), 1);
    }
}
