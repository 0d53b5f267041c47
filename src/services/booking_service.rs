use std::sync::Arc;

use chrono::{Datelike, Utc, Weekday};
use uuid::Uuid;

use crate::{
    availability::{Availability, SlotRequest, check_availability, parse_start},
    dto::bookings::{
        AvailabilityResponse, BookingDashboard, BookingList, CourtSummary, CreateBookingRequest,
        DeletedBooking, StatusSummary, UpdateBookingRequest, WeekdaySummary,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner},
    models::{Booking, BookingStatus, Court},
    response::{ApiResponse, Meta},
    routes::params::BookingListQuery,
    store::{BookingFilter, BookingPatch, BookingStore, CourtStore, NewBooking},
};

/// Availability checks and booking lifecycle on top of the booking and court stores.
///
/// Creation reads the court's active bookings and then inserts, with nothing
/// holding the slot in between. Two simultaneous requests for the same slot can
/// both pass the check and produce a double booking.
#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingStore>,
    courts: Arc<dyn CourtStore>,
}

impl BookingService {
    pub fn new(bookings: Arc<dyn BookingStore>, courts: Arc<dyn CourtStore>) -> Self {
        Self { bookings, courts }
    }

    pub async fn list_bookings(
        &self,
        query: BookingListQuery,
    ) -> AppResult<ApiResponse<BookingList>> {
        let (page, per_page, offset) = query.pagination().normalize();

        let statuses = match query.status.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(status) => vec![status.parse::<BookingStatus>().map_err(AppError::Validation)?],
            None => Vec::new(),
        };

        let mut filter = BookingFilter {
            court_contains: non_blank(query.court),
            player_contains: non_blank(query.player),
            owner_email: non_blank(query.owner_email).map(|e| e.to_lowercase()),
            statuses,
            from: parse_start(query.from.as_deref(), None)?,
            to: parse_start(query.to.as_deref(), None)?,
            ..BookingFilter::default()
        };

        let total = self.bookings.count(&filter).await? as i64;

        filter.limit = Some(per_page as u64);
        filter.offset = offset as u64;
        let items = self.bookings.find(&filter).await?;

        Ok(ApiResponse::success(
            "Bookings",
            BookingList { items },
            Some(Meta::new(page, per_page, total)),
        ))
    }

    pub async fn get_booking(&self, id: Uuid) -> AppResult<ApiResponse<Booking>> {
        let booking = self.find_existing(id).await?;
        Ok(ApiResponse::success("Booking", booking, Some(Meta::empty())))
    }

    pub async fn check_court_availability(
        &self,
        court: &str,
        date: Option<&str>,
        time: Option<&str>,
        duration_hours: Option<f64>,
    ) -> AppResult<ApiResponse<AvailabilityResponse>> {
        let start = parse_start(date, time)?;
        let request = SlotRequest::new(Some(court), start, Some(duration_hours.unwrap_or(1.0)))?;
        let court = self.find_court(&request.court).await?;

        let availability = self.availability_for(&request, &court, None).await?;

        let data = AvailabilityResponse {
            court: court.name,
            start_time: request.slot.start,
            duration_hours: request.duration_hours,
            available: availability.available,
            conflict_count: availability.conflicts.len(),
            conflicts: availability.conflicts,
        };
        Ok(ApiResponse::success("Availability", data, Some(Meta::empty())))
    }

    pub async fn create_booking(
        &self,
        user: &AuthUser,
        payload: CreateBookingRequest,
    ) -> AppResult<ApiResponse<Booking>> {
        let start = resolve_start(
            payload.start_time.as_deref(),
            payload.date.as_deref(),
            payload.time.as_deref(),
        )?;
        let request = SlotRequest::new(payload.court.as_deref(), start, payload.duration_hours)?;
        request.ensure_not_past(Utc::now())?;

        let court = self.bookable_court(&request.court).await?;

        let availability = self.availability_for(&request, &court, None).await?;
        if !availability.available {
            return Err(conflict_error(&court.name, &availability));
        }

        let player_name = non_blank(payload.player_name).unwrap_or_else(|| user.name.clone());
        let new_booking = NewBooking {
            court_name: court.name.clone(),
            player_name,
            start_time: request.slot.start,
            duration_hours: request.duration_hours,
            status: BookingStatus::Pending,
            price_cents: price_cents(court.price_per_hour_cents, request.duration_hours),
            owner_email: user.email.to_lowercase(),
        };

        let id = self.bookings.insert(new_booking).await?;
        let booking = self.bookings.find_by_id(id).await?.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("booking {id} vanished after insert"))
        })?;

        tracing::info!(
            booking_id = %booking.id,
            court = %booking.court_name,
            start = %booking.start_time,
            "booking created"
        );

        Ok(ApiResponse::success(
            "Booking created",
            booking,
            Some(Meta::empty()),
        ))
    }

    pub async fn update_booking(
        &self,
        user: &AuthUser,
        id: Uuid,
        payload: UpdateBookingRequest,
    ) -> AppResult<ApiResponse<Booking>> {
        let existing = self.find_existing(id).await?;
        ensure_owner(user, &existing)?;

        let mut patch = BookingPatch {
            court_name: non_blank(payload.court),
            player_name: non_blank(payload.player_name),
            start_time: resolve_start(
                payload.start_time.as_deref(),
                payload.date.as_deref(),
                payload.time.as_deref(),
            )?,
            duration_hours: payload.duration_hours,
            ..BookingPatch::default()
        };
        if let Some(status) = payload.status.as_deref().filter(|s| !s.trim().is_empty()) {
            patch.status = Some(status.parse::<BookingStatus>().map_err(AppError::Validation)?);
        }

        let mut updated = existing.clone();
        patch.apply(&mut updated);

        let court_changed = updated.court_name != existing.court_name;
        let slot_changed = court_changed
            || updated.start_time != existing.start_time
            || updated.duration_hours != existing.duration_hours;
        let reactivated = updated.status.is_active() && !existing.status.is_active();

        let request = if slot_changed || reactivated {
            let request = SlotRequest::new(
                Some(&updated.court_name),
                Some(updated.start_time),
                Some(updated.duration_hours),
            )?;
            if patch.start_time.is_some() {
                request.ensure_not_past(Utc::now())?;
            }
            Some(request)
        } else {
            None
        };

        let court = if court_changed {
            Some(self.bookable_court(&updated.court_name).await?)
        } else if patch.duration_hours.is_some() || request.is_some() {
            Some(self.find_court(&updated.court_name).await?)
        } else {
            None
        };

        if let (Some(request), Some(court)) = (&request, &court) {
            if updated.status.is_active() {
                let availability = self
                    .availability_for(request, court, Some(existing.id))
                    .await?;
                if !availability.available {
                    return Err(conflict_error(&court.name, &availability));
                }
            }
        }

        if let (Some(duration_hours), Some(court)) = (patch.duration_hours, &court) {
            patch.price_cents = Some(price_cents(court.price_per_hour_cents, duration_hours));
        }

        let matched = self.bookings.update_by_id(id, patch).await?;
        if matched == 0 {
            return Err(AppError::not_found("Booking not found"));
        }
        let booking = self.find_existing(id).await?;

        tracing::info!(booking_id = %booking.id, status = %booking.status, "booking updated");

        Ok(ApiResponse::success(
            "Booking updated",
            booking,
            Some(Meta::empty()),
        ))
    }

    pub async fn delete_booking(
        &self,
        user: &AuthUser,
        id: Uuid,
    ) -> AppResult<ApiResponse<DeletedBooking>> {
        let existing = self.find_existing(id).await?;
        ensure_owner(user, &existing)?;

        let deleted = self.bookings.delete_by_id(id).await?;
        if deleted == 0 {
            return Err(AppError::not_found("Booking not found"));
        }

        tracing::info!(booking_id = %id, "booking deleted");

        Ok(ApiResponse::success(
            "Booking deleted",
            DeletedBooking { id },
            Some(Meta::empty()),
        ))
    }

    pub async fn dashboard(&self) -> AppResult<ApiResponse<BookingDashboard>> {
        let bookings = self.bookings.find(&BookingFilter::default()).await?;
        Ok(ApiResponse::success(
            "Booking dashboard",
            summarize(&bookings),
            Some(Meta::empty()),
        ))
    }

    async fn find_existing(&self, id: Uuid) -> AppResult<Booking> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))
    }

    async fn find_court(&self, name: &str) -> AppResult<Court> {
        self.courts
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Court '{name}' not found")))
    }

    async fn bookable_court(&self, name: &str) -> AppResult<Court> {
        let court = self.find_court(name).await?;
        if !court.active {
            return Err(AppError::validation(format!(
                "Court '{}' is not accepting bookings",
                court.name
            )));
        }
        Ok(court)
    }

    async fn availability_for(
        &self,
        request: &SlotRequest,
        court: &Court,
        exclude: Option<Uuid>,
    ) -> AppResult<Availability> {
        let existing = self
            .bookings
            .find(&BookingFilter::active_on_court(&court.name))
            .await?;
        Ok(check_availability(request, &existing, exclude))
    }
}

fn resolve_start(
    start_time: Option<&str>,
    date: Option<&str>,
    time: Option<&str>,
) -> AppResult<Option<chrono::DateTime<Utc>>> {
    match start_time.map(str::trim).filter(|s| !s.is_empty()) {
        Some(start_time) => parse_start(Some(start_time), None),
        None => parse_start(date, time),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn conflict_error(court: &str, availability: &Availability) -> AppError {
    AppError::Conflict(format!(
        "Court '{court}' is not available at that time ({} conflicting booking(s))",
        availability.conflicts.len()
    ))
}

/// Hourly rate times duration, rounded to the nearest cent.
pub fn price_cents(price_per_hour_cents: i64, duration_hours: f64) -> i64 {
    (price_per_hour_cents as f64 * duration_hours).round() as i64
}

/// Totals per status, per court and per weekday. Revenue excludes cancelled bookings.
pub fn summarize(bookings: &[Booking]) -> BookingDashboard {
    let total_revenue_cents = bookings
        .iter()
        .filter(|b| b.status.is_active())
        .map(|b| b.price_cents)
        .sum();

    let by_status = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
    ]
    .into_iter()
    .filter_map(|status| {
        let matching: Vec<&Booking> = bookings.iter().filter(|b| b.status == status).collect();
        (!matching.is_empty()).then(|| StatusSummary {
            status,
            count: matching.len() as u64,
            revenue_cents: matching.iter().map(|b| b.price_cents).sum(),
        })
    })
    .collect();

    let mut by_court: Vec<CourtSummary> = Vec::new();
    for booking in bookings {
        match by_court.iter_mut().find(|c| c.court == booking.court_name) {
            Some(summary) => {
                summary.count += 1;
                summary.revenue_cents += booking.price_cents;
            }
            None => by_court.push(CourtSummary {
                court: booking.court_name.clone(),
                count: 1,
                revenue_cents: booking.price_cents,
            }),
        }
    }
    by_court.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.court.cmp(&b.court)));

    let by_weekday = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .into_iter()
    .filter_map(|day| {
        let count = bookings
            .iter()
            .filter(|b| b.start_time.weekday() == day)
            .count() as u64;
        (count > 0).then(|| WeekdaySummary {
            weekday: weekday_name(day).to_string(),
            count,
        })
    })
    .collect();

    BookingDashboard {
        total_bookings: bookings.len() as u64,
        total_revenue_cents,
        by_status,
        by_court,
        by_weekday,
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn booking(court: &str, day: u32, status: BookingStatus, price_cents: i64) -> Booking {
        let start = Utc.with_ymd_and_hms(2030, 6, day, 10, 0, 0).unwrap();
        Booking {
            id: Uuid::new_v4(),
            court_name: court.to_string(),
            player_name: "Leo".to_string(),
            start_time: start,
            duration_hours: 1.0,
            status,
            price_cents,
            owner_email: "leo@example.com".to_string(),
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn price_scales_with_duration() {
        assert_eq!(price_cents(2500, 1.0), 2500);
        assert_eq!(price_cents(2500, 1.5), 3750);
        assert_eq!(price_cents(1500, 2.0), 3000);
    }

    #[test]
    fn dashboard_groups_bookings() {
        // 2030-06-03 is a Monday.
        let bookings = vec![
            booking("Central", 3, BookingStatus::Confirmed, 2500),
            booking("Central", 3, BookingStatus::Pending, 2500),
            booking("Norte", 4, BookingStatus::Cancelled, 2000),
        ];

        let dashboard = summarize(&bookings);
        assert_eq!(dashboard.total_bookings, 3);
        assert_eq!(dashboard.total_revenue_cents, 5000);

        assert_eq!(dashboard.by_status.len(), 3);
        assert_eq!(dashboard.by_status[2].status, BookingStatus::Cancelled);
        assert_eq!(dashboard.by_status[2].revenue_cents, 2000);

        assert_eq!(dashboard.by_court[0].court, "Central");
        assert_eq!(dashboard.by_court[0].count, 2);
        assert_eq!(dashboard.by_court[1].court, "Norte");

        assert_eq!(
            dashboard.by_weekday,
            vec![
                WeekdaySummary { weekday: "Monday".into(), count: 2 },
                WeekdaySummary { weekday: "Tuesday".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn empty_dashboard() {
        let dashboard = summarize(&[]);
        assert_eq!(dashboard.total_bookings, 0);
        assert!(dashboard.by_status.is_empty());
        assert!(dashboard.by_court.is_empty());
        assert!(dashboard.by_weekday.is_empty());
    }
}
