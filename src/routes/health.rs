use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    status: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadinessData {
    status: String,
    bookings_store: bool,
    catalog_store: bool,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = ApiResponse<HealthData>),
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<ApiResponse<HealthData>> {
    let data = HealthData {
        status: "ok".to_string(),
    };

    Json(ApiResponse::success(
        "Health check",
        data,
        Some(Meta::empty()),
    ))
}

#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Both stores reachable", body = ApiResponse<ReadinessData>),
        (status = 503, description = "A store is unreachable", body = ApiResponse<ReadinessData>),
    ),
    tag = "Health"
)]
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<ReadinessData>>) {
    let bookings_store = match state.orm.ping().await {
        Ok(()) => sqlx::query("SELECT 1").execute(&state.pool).await.is_ok(),
        Err(err) => {
            tracing::warn!(error = %err, "bookings store ping failed");
            false
        }
    };
    let catalog_store = match sqlx::query("SELECT 1").execute(&state.catalog).await {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(error = %err, "catalog store ping failed");
            false
        }
    };

    let ready = bookings_store && catalog_store;
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let data = ReadinessData {
        status: if ready { "ready" } else { "unavailable" }.to_string(),
        bookings_store,
        catalog_store,
    };

    let mut body = ApiResponse::success("Readiness check", data, Some(Meta::empty()));
    body.success = ready;
    (status, Json(body))
}
