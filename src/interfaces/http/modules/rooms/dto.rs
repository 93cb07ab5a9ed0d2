//! Room DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Room;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoomDto {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub equipment: String,
}

impl From<Room> for RoomDto {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            name: r.name,
            capacity: r.capacity,
            equipment: r.equipment,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(range(min = 1, message = "capacity must be positive"))]
    pub capacity: i32,
    #[validate(length(max = 500, message = "equipment must be at most 500 characters"))]
    pub equipment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomCatalogResponse {
    pub rooms: Vec<RoomDto>,
    pub last_fetched: Option<DateTime<Utc>>,
}

/// Slot to look up free rooms for
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailableRoomsParams {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start: String,
    /// `HH:MM`, exclusive
    pub end: String,
}
