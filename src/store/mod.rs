//! Persistence seams used by the booking service.
//!
//! The service only talks to these traits, so the conflict logic can be
//! exercised without a database. The sea-orm implementations live next door.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Booking, BookingStatus, Court},
};

pub mod bookings;
pub mod courts;

pub use bookings::SeaOrmBookingStore;
pub use courts::SeaOrmCourtStore;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilter {
    /// Exact court name.
    pub court_name: Option<String>,
    /// Case-insensitive substring of the court name.
    pub court_contains: Option<String>,
    /// Case-insensitive substring of the player name.
    pub player_contains: Option<String>,
    pub owner_email: Option<String>,
    /// Empty means any status.
    pub statuses: Vec<BookingStatus>,
    /// Inclusive lower bound on the start time.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the start time.
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<u64>,
    pub offset: u64,
}

impl BookingFilter {
    /// Every booking that currently holds a slot on `court_name`.
    pub fn active_on_court(court_name: &str) -> Self {
        Self {
            court_name: Some(court_name.to_string()),
            statuses: BookingStatus::ACTIVE.to_vec(),
            ..Self::default()
        }
    }

    /// Same predicate the SQL condition expresses, ignoring paging.
    pub fn matches(&self, booking: &Booking) -> bool {
        self.court_name
            .as_ref()
            .is_none_or(|court| &booking.court_name == court)
            && self
                .court_contains
                .as_ref()
                .is_none_or(|part| contains_ignore_case(&booking.court_name, part))
            && self
                .player_contains
                .as_ref()
                .is_none_or(|part| contains_ignore_case(&booking.player_name, part))
            && self
                .owner_email
                .as_ref()
                .is_none_or(|email| &booking.owner_email == email)
            && (self.statuses.is_empty() || self.statuses.contains(&booking.status))
            && self.from.is_none_or(|from| booking.start_time >= from)
            && self.to.is_none_or(|to| booking.start_time <= to)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub court_name: String,
    pub player_name: String,
    pub start_time: DateTime<Utc>,
    pub duration_hours: f64,
    pub status: BookingStatus,
    pub price_cents: i64,
    pub owner_email: String,
}

/// Fields to overwrite; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingPatch {
    pub court_name: Option<String>,
    pub player_name: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub duration_hours: Option<f64>,
    pub status: Option<BookingStatus>,
    pub price_cents: Option<i64>,
}

impl BookingPatch {
    pub fn apply(&self, booking: &mut Booking) {
        if let Some(court_name) = &self.court_name {
            booking.court_name = court_name.clone();
        }
        if let Some(player_name) = &self.player_name {
            booking.player_name = player_name.clone();
        }
        if let Some(start_time) = self.start_time {
            booking.start_time = start_time;
        }
        if let Some(duration_hours) = self.duration_hours {
            booking.duration_hours = duration_hours;
        }
        if let Some(status) = self.status {
            booking.status = status;
        }
        if let Some(price_cents) = self.price_cents {
            booking.price_cents = price_cents;
        }
    }
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Matching bookings, latest start first.
    async fn find(&self, filter: &BookingFilter) -> AppResult<Vec<Booking>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>>;

    async fn insert(&self, booking: NewBooking) -> AppResult<Uuid>;

    /// Returns the number of matched bookings.
    async fn update_by_id(&self, id: Uuid, patch: BookingPatch) -> AppResult<u64>;

    /// Returns the number of deleted bookings.
    async fn delete_by_id(&self, id: Uuid) -> AppResult<u64>;

    async fn count(&self, filter: &BookingFilter) -> AppResult<u64>;
}

#[async_trait]
pub trait CourtStore: Send + Sync {
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Court>>;
}
