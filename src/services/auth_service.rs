use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::Utc;
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set, SqlErr};
use uuid::Uuid;

use crate::{
    audit,
    dto::auth::{AuthResponse, LoginRequest, RegisterRequest},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{PlayerLevel, User},
    response::{ApiResponse, Meta},
    services::user_service::user_from_entity,
    state::AppState,
};

const MIN_PASSWORD_LEN: usize = 6;

/// Checked registration input with the email normalized.
#[derive(Debug, PartialEq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub level: PlayerLevel,
}

pub fn validate_registration(payload: RegisterRequest) -> AppResult<Registration> {
    let required = |value: Option<String>| value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let (Some(name), Some(email), Some(password)) = (
        required(payload.name),
        required(payload.email),
        payload.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::validation("Name, email and password are required"));
    };

    if !email.contains('@') {
        return Err(AppError::validation("Email is not valid"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }

    let level = match payload.level.as_deref().filter(|l| !l.trim().is_empty()) {
        Some(level) => level.parse::<PlayerLevel>().map_err(AppError::Validation)?,
        None => PlayerLevel::Beginner,
    };

    Ok(Registration {
        name,
        email: email.to_lowercase(),
        password,
        phone: payload.phone.map(|p| p.trim().to_string()).unwrap_or_default(),
        level,
    })
}

/// A racing registration that loses on the unique email index is still a duplicate.
fn registration_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::validation("Email is already registered")
        }
        _ => AppError::OrmError(err),
    }
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<AuthResponse>> {
    let registration = validate_registration(payload)?;

    let exist = Users::find()
        .filter(UserCol::Email.eq(registration.email.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::validation("Email is already registered"));
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(registration.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();

    let now = Utc::now();
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        name: Set(registration.name),
        email: Set(registration.email),
        password_hash: Set(password_hash),
        phone: Set(registration.phone),
        level: Set(registration.level.as_str().to_string()),
        active: Set(true),
        created_at: Set(now.into()),
        last_login_at: Set(Some(now.into())),
    }
    .insert(&state.orm)
    .await
    .map_err(registration_error)?;

    let token = state.jwt.issue(user.id, &user.email, &user.name)?;

    audit::record(
        &state.pool,
        Some(user.id),
        "user_register",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "User registered",
        AuthResponse {
            user: user_from_entity(user),
            token,
        },
        Some(Meta::empty()),
    ))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<AuthResponse>> {
    let (Some(email), Some(password)) = (
        payload.email.map(|e| e.trim().to_lowercase()).filter(|e| !e.is_empty()),
        payload.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::validation("Email and password are required"));
    };

    let user = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    let user = match user {
        Some(u) => u,
        None => return Err(AppError::Unauthorized("Invalid email or password".into())),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    }

    let mut active: UserActive = user.into();
    active.last_login_at = Set(Some(Utc::now().into()));
    let user = active.update(&state.orm).await?;

    let token = state.jwt.issue(user.id, &user.email, &user.name)?;

    audit::record(
        &state.pool,
        Some(user.id),
        "user_login",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        AuthResponse {
            user: user_from_entity(user),
            token,
        },
        Some(Meta::empty()),
    ))
}

pub async fn profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let found = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .map(user_from_entity)
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(ApiResponse::success("Profile", found, Some(Meta::empty())))
}
