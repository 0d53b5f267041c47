use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Booking, BookingStatus};

/// Body of `POST /api/bookings`.
///
/// The start is either `start_time` or `date` plus `time`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub court: Option<String>,
    pub start_time: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub duration_hours: Option<f64>,
    /// Defaults to the caller's account name.
    pub player_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBookingRequest {
    pub court: Option<String>,
    pub start_time: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub duration_hours: Option<f64>,
    pub status: Option<String>,
    pub player_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct BookingList {
    #[schema(value_type = Vec<Booking>)]
    pub items: Vec<Booking>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub court: String,
    pub start_time: DateTime<Utc>,
    pub duration_hours: f64,
    pub available: bool,
    pub conflict_count: usize,
    pub conflicts: Vec<Booking>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedBooking {
    pub id: uuid::Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatusSummary {
    pub status: BookingStatus,
    pub count: u64,
    pub revenue_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CourtSummary {
    pub court: String,
    pub count: u64,
    pub revenue_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WeekdaySummary {
    pub weekday: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookingDashboard {
    pub total_bookings: u64,
    pub total_revenue_cents: i64,
    pub by_status: Vec<StatusSummary>,
    pub by_court: Vec<CourtSummary>,
    pub by_weekday: Vec<WeekdaySummary>,
}
