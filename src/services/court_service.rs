use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    dto::directory::CourtList,
    entity::courts::{Column as CourtCol, Entity as Courts},
    error::{AppError, AppResult},
    models::Court,
    response::{ApiResponse, Meta},
    routes::params::CourtQuery,
    state::AppState,
    store::courts::court_from_entity,
};

pub async fn list_courts(state: &AppState, query: CourtQuery) -> AppResult<ApiResponse<CourtList>> {
    let mut condition = Condition::all().add(CourtCol::Active.eq(query.active.unwrap_or(true)));
    if let Some(surface) = query.surface.as_deref().filter(|s| !s.trim().is_empty()) {
        condition = condition.add(CourtCol::Surface.eq(surface.trim()));
    }
    if let Some(covered) = query.covered {
        condition = condition.add(CourtCol::Covered.eq(covered));
    }

    let items = Courts::find()
        .filter(condition)
        .order_by_asc(CourtCol::PricePerHourCents)
        .order_by_asc(CourtCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(court_from_entity)
        .collect();

    Ok(ApiResponse::success("Courts", CourtList { items }, Some(Meta::empty())))
}

pub async fn get_court(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Court>> {
    let court = Courts::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(court_from_entity)
        .ok_or_else(|| AppError::not_found("Court not found"))?;
    Ok(ApiResponse::success("Court", court, Some(Meta::empty())))
}
