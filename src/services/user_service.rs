use chrono::Utc;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    dto::directory::{LevelCount, LevelStats, UserList},
    entity::users::{Column as UserCol, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    models::{PlayerLevel, User},
    response::{ApiResponse, Meta},
    routes::params::UserQuery,
    state::AppState,
};

pub async fn list_users(state: &AppState, query: UserQuery) -> AppResult<ApiResponse<UserList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all().add(UserCol::Active.eq(query.active.unwrap_or(true)));
    if let Some(level) = query.level.as_deref().filter(|l| !l.trim().is_empty()) {
        let level = level.parse::<PlayerLevel>().map_err(AppError::Validation)?;
        condition = condition.add(UserCol::Level.eq(level.as_str()));
    }

    let finder = Users::find()
        .filter(condition)
        .order_by_desc(UserCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(user_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Users",
        UserList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_user(state: &AppState, id: Uuid) -> AppResult<ApiResponse<User>> {
    let user = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(user_from_entity)
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(ApiResponse::success("User", user, Some(Meta::empty())))
}

pub async fn level_stats(state: &AppState) -> AppResult<ApiResponse<LevelStats>> {
    let by_level = sqlx::query_as::<_, LevelCount>(
        "SELECT level, COUNT(*) AS count FROM users GROUP BY level ORDER BY count DESC, level",
    )
    .fetch_all(&state.pool)
    .await?;

    let total_active_users = Users::find()
        .filter(UserCol::Active.eq(true))
        .count(&state.orm)
        .await? as i64;

    Ok(ApiResponse::success(
        "User levels",
        LevelStats {
            total_active_users,
            by_level,
        },
        Some(Meta::empty()),
    ))
}

pub fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        level: model.level,
        active: model.active,
        created_at: model.created_at.with_timezone(&Utc),
        last_login_at: model.last_login_at.map(|dt| dt.with_timezone(&Utc)),
    }
}
