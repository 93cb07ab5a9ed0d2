//! Room API handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use super::dto::{AvailableRoomsParams, CreateRoomRequest, RoomCatalogResponse, RoomDto};
use crate::application::{BookingService, RoomCatalog, RoomRequest};
use crate::application::booking::request::parse_slot;
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiPath, ApiQuery, ApiResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::shared::time::parse_date;

#[derive(Clone)]
pub struct RoomHandlerState {
    pub catalog: Arc<RoomCatalog>,
    pub booking: Arc<BookingService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "Rooms",
    responses(
        (status = 200, description = "All rooms", body = ApiResponse<Vec<RoomDto>>)
    )
)]
pub async fn list_rooms(
    State(state): State<RoomHandlerState>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, ApiError<Vec<RoomDto>>> {
    let rooms = state.catalog.rooms().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        rooms.into_iter().map(RoomDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    tag = "Rooms",
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room details", body = ApiResponse<RoomDto>),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_room(
    State(state): State<RoomHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<RoomDto>>, ApiError<RoomDto>> {
    let room = state.catalog.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(room.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room provisioned", body = ApiResponse<RoomDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn create_room(
    State(state): State<RoomHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoomDto>>), ApiError<RoomDto>> {
    user.require_admin()?;

    let room = state
        .catalog
        .create(RoomRequest {
            name: request.name,
            capacity: request.capacity,
            equipment: request.equipment,
        })
        .await
        .map_err(domain_error)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(room.into()))))
}

#[utoipa::path(
    post,
    path = "/api/v1/rooms/refresh",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Catalog reloaded from storage", body = ApiResponse<RoomCatalogResponse>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn refresh_rooms(
    State(state): State<RoomHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<RoomCatalogResponse>>, ApiError<RoomCatalogResponse>> {
    user.require_admin()?;

    let rooms = state.catalog.refresh().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(RoomCatalogResponse {
        rooms: rooms.into_iter().map(RoomDto::from).collect(),
        last_fetched: state.catalog.last_fetched().await,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/available",
    tag = "Rooms",
    params(AvailableRoomsParams),
    responses(
        (status = 200, description = "Rooms free for the whole slot", body = ApiResponse<Vec<RoomDto>>),
        (status = 400, description = "Invalid date or slot")
    )
)]
pub async fn available_rooms(
    State(state): State<RoomHandlerState>,
    ApiQuery(params): ApiQuery<AvailableRoomsParams>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, ApiError<Vec<RoomDto>>> {
    let date = parse_date(&params.date).map_err(domain_error)?;
    let (start, end) = parse_slot(&params.start, &params.end).map_err(domain_error)?;

    let rooms = state
        .booking
        .available_rooms(date, start, end)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        rooms.into_iter().map(RoomDto::from).collect(),
    )))
}
