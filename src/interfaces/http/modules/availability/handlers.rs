//! Availability handler

use axum::{extract::State, Json};

use super::dto::{AvailabilityParams, AvailabilityResponse};
use crate::interfaces::http::common::{domain_error, ApiError, ApiQuery, ApiResponse};
use crate::interfaces::http::modules::reservations::ReservationHandlerState;

#[utoipa::path(
    get,
    path = "/api/v1/availability",
    tag = "Reservations",
    params(AvailabilityParams),
    responses(
        (status = 200, description = "Whether the slot is free, with any conflicts", body = ApiResponse<AvailabilityResponse>),
        (status = 400, description = "Invalid date or slot"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn check_availability(
    State(state): State<ReservationHandlerState>,
    ApiQuery(params): ApiQuery<AvailabilityParams>,
) -> Result<Json<ApiResponse<AvailabilityResponse>>, ApiError<AvailabilityResponse>> {
    let report = state
        .booking
        .check_availability(params.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(report.into())))
}
