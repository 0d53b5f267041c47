use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::bookings::{
        BookingDashboard, BookingList, CreateBookingRequest, DeletedBooking, UpdateBookingRequest,
    },
    error::AppResult,
    extract::{AppJson, AppPath, AppQuery},
    middleware::auth::AuthUser,
    models::Booking,
    response::ApiResponse,
    routes::params::BookingListQuery,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/stats/dashboard", get(dashboard))
        .route(
            "/{id}",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
}

#[utoipa::path(
    get,
    path = "/api/bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "List bookings, latest start first", body = ApiResponse<BookingList>),
        (status = 400, description = "Invalid filter")
    ),
    tag = "Bookings"
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<BookingListQuery>,
) -> AppResult<Json<ApiResponse<BookingList>>> {
    let resp = state.bookings.list_bookings(query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Get booking", body = ApiResponse<Booking>),
        (status = 404, description = "Booking not found")
    ),
    tag = "Bookings"
)]
pub async fn get_booking(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let resp = state.bookings.get_booking(id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = ApiResponse<Booking>),
        (status = 400, description = "Invalid or past slot"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Court not found"),
        (status = 409, description = "Slot overlaps an active booking")
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Booking>>)> {
    let resp = state.bookings.create_booking(&user, payload).await?;

    if let Some(booking) = &resp.data {
        audit::record(
            &state.pool,
            Some(user.user_id),
            "booking_create",
            "bookings",
            serde_json::json!({ "booking_id": booking.id, "court": booking.court_name }),
        )
        .await;
    }

    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = ApiResponse<Booking>),
        (status = 400, description = "Invalid change"),
        (status = 403, description = "Booking belongs to another user"),
        (status = 404, description = "Booking or court not found"),
        (status = 409, description = "New slot overlaps an active booking")
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
pub async fn update_booking(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateBookingRequest>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let resp = state.bookings.update_booking(&user, id, payload).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "booking_update",
        "bookings",
        serde_json::json!({ "booking_id": id }),
    )
    .await;

    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking deleted", body = ApiResponse<DeletedBooking>),
        (status = 403, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<DeletedBooking>>> {
    let resp = state.bookings.delete_booking(&user, id).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "booking_delete",
        "bookings",
        serde_json::json!({ "booking_id": id }),
    )
    .await;

    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/bookings/stats/dashboard",
    responses(
        (status = 200, description = "Booking totals by status, court and weekday", body = ApiResponse<BookingDashboard>)
    ),
    tag = "Bookings"
)]
pub async fn dashboard(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<BookingDashboard>>> {
    let resp = state.bookings.dashboard().await?;
    Ok(Json(resp))
}
