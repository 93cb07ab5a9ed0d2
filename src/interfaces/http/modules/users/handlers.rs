//! User profile handler

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::auth::{AuthHandlerState, UserInfo};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub message: String,
    pub user: UserInfo,
}

#[utoipa::path(
    get,
    path = "/api/v1/user/profile",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile of the signed-in user", body = ApiResponse<ProfileResponse>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_profile(
    State(state): State<AuthHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<ProfileResponse>>, ApiError<ProfileResponse>> {
    let account = state
        .identity
        .profile(&user.user_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(ProfileResponse {
        message: format!("Welcome, {}", account.username),
        user: account.into(),
    })))
}
