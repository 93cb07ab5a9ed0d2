//! Authentication middleware for Axum
//!
//! Bearer JWTs only. A valid token places an `AuthenticatedUser` in the
//! request extensions; role checks happen in the handlers.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::common::{ApiError, ApiResponse};
use crate::domain::UserRole;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    InsufficientPermissions,
}

#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Caller identity taken from a verified token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub username: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// `None` when the token carries a role this service does not know
    pub fn from_claims(claims: TokenClaims) -> Option<Self> {
        let role = claims.role.parse().ok()?;
        Some(Self {
            user_id: claims.sub,
            username: claims.username,
            role,
        })
    }

    /// Admins hold every role
    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role || self.role == UserRole::Admin
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// 403 unless the caller is an admin
    pub fn require_admin<T>(&self) -> Result<(), ApiError<T>> {
        if self.has_role(UserRole::Admin) {
            Ok(())
        } else {
            Err((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("Insufficient permissions")),
            ))
        }
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let claims = match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => claims,
        Err(e) if matches!(e.kind(), jsonwebtoken::errors::ErrorKind::ExpiredSignature) => {
            return auth_error_response(AuthError::ExpiredToken);
        }
        Err(_) => return auth_error_response(AuthError::InvalidToken),
    };
    if claims.is_expired() {
        return auth_error_response(AuthError::ExpiredToken);
    }

    let Some(user) = AuthenticatedUser::from_claims(claims) else {
        return auth_error_response(AuthError::InsufficientPermissions);
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}

pub fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
        AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token has expired"),
        AuthError::InsufficientPermissions => (StatusCode::FORBIDDEN, "Insufficient permissions"),
    };

    (status, Json(ApiResponse::<()>::error(message))).into_response()
}
