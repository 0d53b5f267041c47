use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Court, Tournament, User};

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CourtList {
    #[schema(value_type = Vec<Court>)]
    pub items: Vec<Court>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct TournamentList {
    #[schema(value_type = Vec<Tournament>)]
    pub items: Vec<Tournament>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct UserList {
    #[schema(value_type = Vec<User>)]
    pub items: Vec<User>,
}

#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct LevelCount {
    pub level: String,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LevelStats {
    pub total_active_users: i64,
    pub by_level: Vec<LevelCount>,
}
