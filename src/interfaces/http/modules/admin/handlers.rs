//! Admin dashboard

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{BookingService, IdentityService};
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct AdminHandlerState {
    pub booking: Arc<BookingService>,
    pub identity: Arc<IdentityService>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub message: String,
    pub rooms: usize,
    pub reservations: usize,
    pub reservations_today: usize,
    pub users: u64,
    pub today: NaiveDate,
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/dashboard",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard counters", body = ApiResponse<DashboardResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn dashboard(
    State(state): State<AdminHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<DashboardResponse>>, ApiError<DashboardResponse>> {
    user.require_admin()?;

    // Reservations carry naive local dates, so "today" is local too.
    let today = Local::now().date_naive();
    let summary = state.booking.summary(today).await.map_err(domain_error)?;
    let users = state.identity.user_count().await.map_err(domain_error)?;

    Ok(Json(ApiResponse::success(DashboardResponse {
        message: format!("Welcome to the admin dashboard, {}", user.username),
        rooms: summary.rooms,
        reservations: summary.reservations,
        reservations_today: summary.reservations_on_date,
        users,
        today,
    })))
}
