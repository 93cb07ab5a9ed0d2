use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::{AvailabilityReport, AvailabilityRequest};
use crate::interfaces::http::modules::reservations::ReservationDto;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityParams {
    pub room_id: i32,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start: String,
    /// `HH:MM`, exclusive
    pub end: String,
    /// Reservation being edited, ignored when checking
    pub exclude_id: Option<i32>,
}

impl From<AvailabilityParams> for AvailabilityRequest {
    fn from(p: AvailabilityParams) -> Self {
        Self {
            room_id: p.room_id,
            date: p.date,
            start: p.start,
            end: p.end,
            exclude_id: p.exclude_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityResponse {
    pub available: bool,
    /// Reservations overlapping the requested slot
    pub conflicts: Vec<ReservationDto>,
}

impl From<AvailabilityReport> for AvailabilityResponse {
    fn from(r: AvailabilityReport) -> Self {
        Self {
            available: r.available,
            conflicts: r.conflicts.into_iter().map(ReservationDto::from).collect(),
        }
    }
}
