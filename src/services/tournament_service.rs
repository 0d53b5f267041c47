use chrono::Utc;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    dto::directory::TournamentList,
    entity::tournaments::{Column as TournamentCol, Entity as Tournaments, Model as TournamentModel},
    error::{AppError, AppResult},
    models::Tournament,
    response::{ApiResponse, Meta},
    routes::params::TournamentQuery,
    state::AppState,
};

/// Statuses a tournament can still be joined or watched in.
const UPCOMING_STATUSES: [&str; 2] = ["open", "scheduled"];
const UPCOMING_LIMIT: u64 = 5;

pub async fn list_tournaments(
    state: &AppState,
    query: TournamentQuery,
) -> AppResult<ApiResponse<TournamentList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(status) = query.status.as_deref().filter(|s| !s.trim().is_empty()) {
        condition = condition.add(TournamentCol::Status.eq(status.trim()));
    }
    if let Some(category) = query.category.as_deref().filter(|c| !c.trim().is_empty()) {
        condition = condition.add(TournamentCol::Category.eq(category.trim()));
    }

    let finder = Tournaments::find()
        .filter(condition)
        .order_by_asc(TournamentCol::StartsAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(tournament_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Tournaments",
        TournamentList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_tournament(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Tournament>> {
    let tournament = Tournaments::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(tournament_from_entity)
        .ok_or_else(|| AppError::not_found("Tournament not found"))?;
    Ok(ApiResponse::success("Tournament", tournament, Some(Meta::empty())))
}

pub async fn upcoming_tournaments(state: &AppState) -> AppResult<ApiResponse<TournamentList>> {
    let items = Tournaments::find()
        .filter(
            Condition::all()
                .add(TournamentCol::StartsAt.gte(Utc::now()))
                .add(TournamentCol::Status.is_in(UPCOMING_STATUSES)),
        )
        .order_by_asc(TournamentCol::StartsAt)
        .limit(UPCOMING_LIMIT)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(tournament_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Upcoming tournaments",
        TournamentList { items },
        Some(Meta::empty()),
    ))
}

fn tournament_from_entity(model: TournamentModel) -> Tournament {
    Tournament {
        id: model.id,
        name: model.name,
        category: model.category,
        status: model.status,
        starts_at: model.starts_at.with_timezone(&Utc),
        ends_at: model.ends_at.map(|dt| dt.with_timezone(&Utc)),
        max_teams: model.max_teams,
        entry_fee_cents: model.entry_fee_cents,
        description: model.description,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
