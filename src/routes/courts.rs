use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::{bookings::AvailabilityResponse, directory::CourtList},
    error::AppResult,
    extract::{AppPath, AppQuery},
    models::Court,
    response::ApiResponse,
    routes::params::{AvailabilityQuery, CourtQuery},
    services::court_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courts))
        .route("/availability/{name}", get(court_availability))
        .route("/{id}", get(get_court))
}

#[utoipa::path(
    get,
    path = "/api/courts",
    params(CourtQuery),
    responses(
        (status = 200, description = "List courts, cheapest first", body = ApiResponse<CourtList>)
    ),
    tag = "Courts"
)]
pub async fn list_courts(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CourtQuery>,
) -> AppResult<Json<ApiResponse<CourtList>>> {
    let resp = court_service::list_courts(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/courts/{id}",
    params(
        ("id" = Uuid, Path, description = "Court ID")
    ),
    responses(
        (status = 200, description = "Get court", body = ApiResponse<Court>),
        (status = 404, description = "Court not found")
    ),
    tag = "Courts"
)]
pub async fn get_court(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Court>>> {
    let resp = court_service::get_court(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/courts/availability/{name}",
    params(
        ("name" = String, Path, description = "Court name"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Whether the slot is free and what it overlaps", body = ApiResponse<AvailabilityResponse>),
        (status = 400, description = "Missing or malformed slot"),
        (status = 404, description = "Court not found")
    ),
    tag = "Courts"
)]
pub async fn court_availability(
    State(state): State<AppState>,
    AppPath(name): AppPath<String>,
    AppQuery(query): AppQuery<AvailabilityQuery>,
) -> AppResult<Json<ApiResponse<AvailabilityResponse>>> {
    let resp = state
        .bookings
        .check_court_availability(
            &name,
            query.date.as_deref(),
            query.time.as_deref(),
            query.duration,
        )
        .await?;
    Ok(Json(resp))
}
