use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::catalog::{BrandStats, PaddleList, PriceStats},
    error::AppResult,
    extract::{AppPath, AppQuery},
    models::Paddle,
    response::ApiResponse,
    routes::params::PaddleQuery,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_paddles))
        .route("/stats/brands", get(brand_stats))
        .route("/stats/prices", get(price_stats))
        .route("/{id}", get(get_paddle))
}

#[utoipa::path(
    get,
    path = "/api/paddles",
    params(PaddleQuery),
    responses(
        (status = 200, description = "List paddles by brand and model", body = ApiResponse<PaddleList>)
    ),
    tag = "Catalog"
)]
pub async fn list_paddles(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaddleQuery>,
) -> AppResult<Json<ApiResponse<PaddleList>>> {
    let resp = catalog_service::list_paddles(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/paddles/{id}",
    params(
        ("id" = i64, Path, description = "Paddle ID")
    ),
    responses(
        (status = 200, description = "Get paddle", body = ApiResponse<Paddle>),
        (status = 404, description = "Paddle not found")
    ),
    tag = "Catalog"
)]
pub async fn get_paddle(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<ApiResponse<Paddle>>> {
    let resp = catalog_service::get_paddle(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/paddles/stats/brands",
    responses(
        (status = 200, description = "Paddle count and prices per brand", body = ApiResponse<Vec<BrandStats>>)
    ),
    tag = "Catalog"
)]
pub async fn brand_stats(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<BrandStats>>>> {
    let resp = catalog_service::brand_stats(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/paddles/stats/prices",
    responses(
        (status = 200, description = "Price and weight overview with price bands", body = ApiResponse<PriceStats>)
    ),
    tag = "Catalog"
)]
pub async fn price_stats(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<PriceStats>>> {
    let resp = catalog_service::price_stats(&state).await?;
    Ok(Json(resp))
}
