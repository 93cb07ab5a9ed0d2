//! `GET /appsettings`

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::ApplicationSettings;
use crate::interfaces::http::common::ApiResponse;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppSettingsResponse {
    pub api_name: String,
    pub version: String,
}

impl From<&ApplicationSettings> for AppSettingsResponse {
    fn from(s: &ApplicationSettings) -> Self {
        Self {
            api_name: s.api_name.clone(),
            version: s.version.clone(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/appsettings",
    tag = "Health",
    responses(
        (status = 200, description = "Public application settings", body = ApiResponse<AppSettingsResponse>)
    )
)]
pub async fn app_settings(
    State(settings): State<ApplicationSettings>,
) -> Json<ApiResponse<AppSettingsResponse>> {
    Json(ApiResponse::success(AppSettingsResponse::from(&settings)))
}
