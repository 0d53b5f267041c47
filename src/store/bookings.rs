use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
    sea_query::{Expr, extension::postgres::PgExpr},
};
use uuid::Uuid;

use super::{BookingFilter, BookingPatch, BookingStore, NewBooking};
use crate::{
    entity::bookings::{ActiveModel, Column, Entity as Bookings, Model as BookingModel},
    error::{AppError, AppResult},
    models::{Booking, BookingStatus},
};

#[derive(Clone)]
pub struct SeaOrmBookingStore {
    db: DatabaseConnection,
}

impl SeaOrmBookingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn condition(filter: &BookingFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(court_name) = &filter.court_name {
        condition = condition.add(Column::CourtName.eq(court_name.clone()));
    }
    if let Some(part) = &filter.court_contains {
        condition = condition.add(Expr::col(Column::CourtName).ilike(format!("%{part}%")));
    }
    if let Some(part) = &filter.player_contains {
        condition = condition.add(Expr::col(Column::PlayerName).ilike(format!("%{part}%")));
    }
    if let Some(owner_email) = &filter.owner_email {
        condition = condition.add(Column::OwnerEmail.eq(owner_email.clone()));
    }
    if !filter.statuses.is_empty() {
        condition = condition.add(Column::Status.is_in(filter.statuses.iter().map(|s| s.as_str())));
    }
    if let Some(from) = filter.from {
        condition = condition.add(Column::StartTime.gte(from));
    }
    if let Some(to) = filter.to {
        condition = condition.add(Column::StartTime.lte(to));
    }
    condition
}

#[async_trait]
impl BookingStore for SeaOrmBookingStore {
    async fn find(&self, filter: &BookingFilter) -> AppResult<Vec<Booking>> {
        let mut finder = Bookings::find()
            .filter(condition(filter))
            .order_by_desc(Column::StartTime);
        if let Some(limit) = filter.limit {
            finder = finder.limit(limit);
        }
        if filter.offset > 0 {
            finder = finder.offset(filter.offset);
        }

        finder
            .all(&self.db)
            .await?
            .into_iter()
            .map(booking_from_entity)
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        Bookings::find_by_id(id)
            .one(&self.db)
            .await?
            .map(booking_from_entity)
            .transpose()
    }

    async fn insert(&self, booking: NewBooking) -> AppResult<Uuid> {
        let now = Utc::now();
        let active = ActiveModel {
            id: Set(Uuid::new_v4()),
            court_name: Set(booking.court_name),
            player_name: Set(booking.player_name),
            start_time: Set(booking.start_time.into()),
            duration_hours: Set(booking.duration_hours),
            status: Set(booking.status.as_str().to_string()),
            price_cents: Set(booking.price_cents),
            owner_email: Set(booking.owner_email),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let model = active.insert(&self.db).await?;
        Ok(model.id)
    }

    async fn update_by_id(&self, id: Uuid, patch: BookingPatch) -> AppResult<u64> {
        let mut update = Bookings::update_many()
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(Column::Id.eq(id));
        if let Some(court_name) = patch.court_name {
            update = update.col_expr(Column::CourtName, Expr::value(court_name));
        }
        if let Some(player_name) = patch.player_name {
            update = update.col_expr(Column::PlayerName, Expr::value(player_name));
        }
        if let Some(start_time) = patch.start_time {
            update = update.col_expr(Column::StartTime, Expr::value(start_time.fixed_offset()));
        }
        if let Some(duration_hours) = patch.duration_hours {
            update = update.col_expr(Column::DurationHours, Expr::value(duration_hours));
        }
        if let Some(status) = patch.status {
            update = update.col_expr(Column::Status, Expr::value(status.as_str()));
        }
        if let Some(price_cents) = patch.price_cents {
            update = update.col_expr(Column::PriceCents, Expr::value(price_cents));
        }

        let result = update.exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<u64> {
        let result = Bookings::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    async fn count(&self, filter: &BookingFilter) -> AppResult<u64> {
        let total = Bookings::find()
            .filter(condition(filter))
            .count(&self.db)
            .await?;
        Ok(total)
    }
}

fn booking_from_entity(model: BookingModel) -> AppResult<Booking> {
    let status = model.status.parse::<BookingStatus>().map_err(|e| {
        AppError::Internal(anyhow::anyhow!("booking {} has a corrupt status: {e}", model.id))
    })?;

    Ok(Booking {
        id: model.id,
        court_name: model.court_name,
        player_name: model.player_name,
        start_time: model.start_time.with_timezone(&Utc),
        duration_hours: model.duration_hours,
        status,
        price_cents: model.price_cents,
        owner_email: model.owner_email,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
