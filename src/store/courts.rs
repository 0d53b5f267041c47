use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use super::CourtStore;
use crate::{
    entity::courts::{Column, Entity as Courts, Model as CourtModel},
    error::AppResult,
    models::Court,
};

#[derive(Clone)]
pub struct SeaOrmCourtStore {
    db: DatabaseConnection,
}

impl SeaOrmCourtStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourtStore for SeaOrmCourtStore {
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Court>> {
        let court = Courts::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await?
            .map(court_from_entity);
        Ok(court)
    }
}

pub fn court_from_entity(model: CourtModel) -> Court {
    Court {
        id: model.id,
        name: model.name,
        surface: model.surface,
        covered: model.covered,
        active: model.active,
        price_per_hour_cents: model.price_per_hour_cents,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
