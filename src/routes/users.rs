use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    audit,
    dto::{
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        directory::{LevelStats, UserList},
    },
    error::AppResult,
    extract::{AppJson, AppPath, AppQuery},
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Meta},
    routes::params::UserQuery,
    services::{auth_service, user_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/profile", get(profile))
        .route("/stats/levels", get(level_stats))
        .route("/{id}", get(get_user))
}

#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Register user", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Missing fields or email already registered")
    ),
    tag = "Users"
)]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthResponse>>)> {
    let resp = auth_service::register_user(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login user", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Users"
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let resp = auth_service::login_user(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/users/logout",
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> Json<ApiResponse<serde_json::Value>> {
    // Tokens are stateless; the client discards its copy.
    audit::record(
        &state.pool,
        Some(user.user_id),
        "user_logout",
        "users",
        serde_json::json!({ "user_id": user.user_id }),
    )
    .await;

    Json(ApiResponse::success(
        "Logged out",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<User>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = auth_service::profile(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users",
    params(UserQuery),
    responses(
        (status = 200, description = "List users", body = ApiResponse<UserList>)
    ),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<UserQuery>,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = user_service::list_users(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Get user", body = ApiResponse<User>),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::get_user(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users/stats/levels",
    responses(
        (status = 200, description = "Users per level", body = ApiResponse<LevelStats>)
    ),
    tag = "Users"
)]
pub async fn level_stats(State(state): State<AppState>) -> AppResult<Json<ApiResponse<LevelStats>>> {
    let resp = user_service::level_stats(&state).await?;
    Ok(Json(resp))
}
