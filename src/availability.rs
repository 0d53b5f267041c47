//! Booking availability: the one overlap predicate shared by the availability
//! endpoint, booking creation and booking updates.
//!
//! A slot is the half-open interval `[start, start + duration)`. Two slots on the
//! same court conflict when they overlap and neither booking is cancelled, so a
//! slot that starts exactly when another ends is free.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::Booking,
};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Slot {
    pub fn new(start: DateTime<Utc>, duration_hours: f64) -> AppResult<Self> {
        let length = hours_to_delta(duration_hours)
            .ok_or_else(|| AppError::validation("Duration must be a positive number of hours"))?;
        let end = start
            .checked_add_signed(length)
            .ok_or_else(|| AppError::validation("Duration is out of range"))?;
        Ok(Self { start, end })
    }

    /// The slot held by an existing booking. `None` when the stored duration is unusable.
    pub fn of(booking: &Booking) -> Option<Self> {
        Slot::new(booking.start_time, booking.duration_hours).ok()
    }

    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

fn hours_to_delta(hours: f64) -> Option<TimeDelta> {
    if !hours.is_finite() || hours <= 0.0 {
        return None;
    }
    let millis = (hours * MILLIS_PER_HOUR).round();
    if millis < 1.0 || millis >= i64::MAX as f64 {
        return None;
    }
    TimeDelta::try_milliseconds(millis as i64)
}

/// A validated request for a court slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRequest {
    pub court: String,
    pub duration_hours: f64,
    pub slot: Slot,
}

impl SlotRequest {
    /// Fails fast on a blank court, a missing start or a non-positive duration.
    pub fn new(
        court: Option<&str>,
        start: Option<DateTime<Utc>>,
        duration_hours: Option<f64>,
    ) -> AppResult<Self> {
        let court = court
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::validation("Court is required"))?;
        let start = start.ok_or_else(|| AppError::validation("Start time is required"))?;
        let duration_hours =
            duration_hours.ok_or_else(|| AppError::validation("Duration is required"))?;
        let slot = Slot::new(start, duration_hours)?;

        Ok(Self {
            court: court.to_string(),
            duration_hours,
            slot,
        })
    }

    pub fn ensure_not_past(&self, now: DateTime<Utc>) -> AppResult<()> {
        if self.slot.start < now {
            return Err(AppError::validation("Cannot book a court in the past"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Availability {
    pub available: bool,
    pub conflicts: Vec<Booking>,
}

/// Checks `request` against `existing` bookings.
///
/// Bookings on other courts and cancelled bookings are ignored even if the caller
/// passes them in. `exclude` skips the booking being edited.
pub fn check_availability(
    request: &SlotRequest,
    existing: &[Booking],
    exclude: Option<Uuid>,
) -> Availability {
    let conflicts: Vec<Booking> = existing
        .iter()
        .filter(|b| Some(b.id) != exclude)
        .filter(|b| b.status.is_active())
        .filter(|b| b.court_name.trim() == request.court)
        .filter(|b| Slot::of(b).is_some_and(|slot| slot.overlaps(&request.slot)))
        .cloned()
        .collect();

    Availability {
        available: conflicts.is_empty(),
        conflicts,
    }
}

/// Parses a start time from a `date` and an optional `time` of day.
///
/// `date` may be RFC 3339, a naive `YYYY-MM-DDTHH:MM[:SS]` or a bare
/// `YYYY-MM-DD`; naive values are read as UTC. A separate `time` (`HH:MM` or
/// `HH:MM:SS`) requires a bare date.
pub fn parse_start(date: Option<&str>, time: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => d,
        None => return Ok(None),
    };

    if let Some(time) = time.map(str::trim).filter(|t| !t.is_empty()) {
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| AppError::validation(format!("Invalid date '{date}'")))?;
        let time_of_day = NaiveTime::parse_from_str(time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
            .map_err(|_| AppError::validation(format!("Invalid time '{time}'")))?;
        return Ok(Some(day.and_time(time_of_day).and_utc()));
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(date) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(date, format) {
            return Ok(Some(naive.and_utc()));
        }
    }
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Ok(Some(day.and_time(NaiveTime::MIN).and_utc()));
    }

    Err(AppError::validation(format!("Invalid date '{date}'")))
}
