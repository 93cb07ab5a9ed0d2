//! Reservation DTOs
//!
//! Dates travel as `YYYY-MM-DD`, times as `HH:MM`. Inputs also accept
//! ISO-8601 date-times and `HH:MM:SS`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::BookingRequest;
use crate::domain::Reservation;
use crate::shared::time::{format_date, format_time};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationDto {
    pub id: i32,
    pub title: String,
    pub date: String,
    pub start: String,
    pub end: String,
    pub description: Option<String>,
    pub room_id: i32,
    pub duration_minutes: i64,
    /// Send back on update to detect concurrent edits
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        let duration_minutes = r.duration_minutes();
        Self {
            id: r.id,
            title: r.title,
            date: format_date(r.date),
            start: format_time(r.start),
            end: format_time(r.end),
            description: r.description,
            room_id: r.room_id,
            duration_minutes,
            version: r.version,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[schema(example = "2024-01-15")]
    pub date: String,
    #[schema(example = "09:00")]
    pub start: String,
    #[schema(example = "10:00")]
    pub end: String,
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "room_id must be positive"))]
    pub room_id: i32,
}

impl From<CreateReservationRequest> for BookingRequest {
    fn from(r: CreateReservationRequest) -> Self {
        Self {
            title: r.title,
            date: r.date,
            start: r.start,
            end: r.end,
            description: r.description,
            room_id: r.room_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReservationRequest {
    /// Optional; must match the path when present
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    pub date: String,
    pub start: String,
    pub end: String,
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "room_id must be positive"))]
    pub room_id: i32,
    /// Version last read; a mismatch is answered with 409
    pub version: Option<i32>,
}

impl UpdateReservationRequest {
    pub fn into_parts(self) -> (BookingRequest, Option<i32>) {
        let request = BookingRequest {
            title: self.title,
            date: self.date,
            start: self.start,
            end: self.end,
            description: self.description,
            room_id: self.room_id,
        };
        (request, self.version)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReservationListParams {
    /// Only reservations on this day (`YYYY-MM-DD`)
    pub date: Option<String>,
    /// Only reservations of this room
    pub room_id: Option<i32>,
}
