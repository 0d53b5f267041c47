use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::directory::TournamentList,
    error::AppResult,
    extract::{AppPath, AppQuery},
    models::Tournament,
    response::ApiResponse,
    routes::params::TournamentQuery,
    services::tournament_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tournaments))
        .route("/upcoming", get(upcoming_tournaments))
        .route("/{id}", get(get_tournament))
}

#[utoipa::path(
    get,
    path = "/api/tournaments",
    params(TournamentQuery),
    responses(
        (status = 200, description = "List tournaments by start date", body = ApiResponse<TournamentList>)
    ),
    tag = "Tournaments"
)]
pub async fn list_tournaments(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<TournamentQuery>,
) -> AppResult<Json<ApiResponse<TournamentList>>> {
    let resp = tournament_service::list_tournaments(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/tournaments/upcoming",
    responses(
        (status = 200, description = "Next open or scheduled tournaments", body = ApiResponse<TournamentList>)
    ),
    tag = "Tournaments"
)]
pub async fn upcoming_tournaments(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<TournamentList>>> {
    let resp = tournament_service::upcoming_tournaments(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/tournaments/{id}",
    params(
        ("id" = Uuid, Path, description = "Tournament ID")
    ),
    responses(
        (status = 200, description = "Get tournament", body = ApiResponse<Tournament>),
        (status = 404, description = "Tournament not found")
    ),
    tag = "Tournaments"
)]
pub async fn get_tournament(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Tournament>>> {
    let resp = tournament_service::get_tournament(&state, id).await?;
    Ok(Json(resp))
}
