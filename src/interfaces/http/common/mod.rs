//! Shared HTTP types: response envelope, error mapping, enveloped extractors

pub mod extract;
pub mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

pub use extract::{ApiPath, ApiQuery};
pub use validated_json::ValidatedJson;

/// Envelope for every JSON response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload, `null` on error
    pub data: Option<T>,
    /// Error description, omitted on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Empty payload for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// Error half of every handler result
pub type ApiError<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a domain error onto its status code and envelope.
///
/// Storage failures are logged and answered with a generic message.
pub fn domain_error<T>(error: DomainError) -> ApiError<T> {
    let status = status_for(&error);
    let message = match &error {
        DomainError::Validation(msg)
        | DomainError::Conflict(msg)
        | DomainError::Unauthorized(msg)
        | DomainError::Forbidden(msg) => msg.clone(),
        DomainError::NotFound { .. } => error.to_string(),
        DomainError::Storage(msg) => {
            tracing::error!(error = %msg, "Storage failure");
            "Internal server error".to_string()
        }
    };
    (status, Json(ApiResponse::error(message)))
}

pub fn bad_request<T>(message: impl Into<String>) -> ApiError<T> {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::not_found("Room", 1), StatusCode::NOT_FOUND),
            (DomainError::Conflict("x".into()), StatusCode::CONFLICT),
            (DomainError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (DomainError::Storage("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            let (status, Json(body)) = domain_error::<()>(error);
            assert_eq!(status, expected);
            assert!(!body.success);
            assert!(body.error.is_some());
        }
    }

    #[test]
    fn storage_details_are_not_leaked() {
        let (_, Json(body)) = domain_error::<()>(DomainError::Storage("disk on fire".into()));
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }
}
