//! Reservation API handlers
//!
//! Reads are public. Writes require a bearer token.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    CreateReservationRequest, ReservationDto, ReservationListParams, UpdateReservationRequest,
};
use crate::application::{BookingService, ReservationFilter};
use crate::interfaces::http::common::{
    bad_request, domain_error, ApiError, ApiPath, ApiQuery, ApiResponse, EmptyData,
    ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::shared::time::parse_date;

#[derive(Clone)]
pub struct ReservationHandlerState {
    pub booking: Arc<BookingService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    params(ReservationListParams),
    responses(
        (status = 200, description = "Reservations by date and start time", body = ApiResponse<Vec<ReservationDto>>),
        (status = 400, description = "Invalid date filter")
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationHandlerState>,
    ApiQuery(params): ApiQuery<ReservationListParams>,
) -> Result<Json<ApiResponse<Vec<ReservationDto>>>, ApiError<Vec<ReservationDto>>> {
    let date = params
        .date
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(domain_error)?;

    let reservations = state
        .booking
        .list(ReservationFilter {
            date,
            room_id: params.room_id,
        })
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        reservations.into_iter().map(ReservationDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError<ReservationDto>> {
    let reservation = state.booking.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Slot already booked")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationDto>>), ApiError<ReservationDto>> {
    tracing::debug!(user = %user.username, title = %request.title, "Booking requested");

    let reservation = state
        .booking
        .create(request.into())
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(reservation.into())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "Reservation updated", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Validation error or id mismatch"),
        (status = 404, description = "Reservation or room not found"),
        (status = 409, description = "Slot already booked or stale version")
    )
)]
pub async fn update_reservation(
    State(state): State<ReservationHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateReservationRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError<ReservationDto>> {
    if request.id.is_some_and(|body_id| body_id != id) {
        return Err(bad_request("Reservation id does not match the path"));
    }
    tracing::debug!(user = %user.username, reservation_id = id, "Update requested");

    let (booking, version) = request.into_parts();
    let reservation = state
        .booking
        .update(id, booking, version)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled", body = ApiResponse<EmptyData>),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn delete_reservation(
    State(state): State<ReservationHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError<EmptyData>> {
    tracing::debug!(user = %user.username, reservation_id = id, "Cancellation requested");

    state.booking.delete(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
