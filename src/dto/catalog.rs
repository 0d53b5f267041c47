use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Article, Paddle};

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct PaddleList {
    #[schema(value_type = Vec<Paddle>)]
    pub items: Vec<Paddle>,
}

#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct BrandStats {
    pub brand: String,
    pub count: i64,
    pub avg_price_cents: f64,
    pub min_price_cents: i64,
    pub max_price_cents: i64,
}

#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct PriceOverview {
    pub total_paddles: i64,
    pub avg_price_cents: Option<f64>,
    pub min_price_cents: Option<i64>,
    pub max_price_cents: Option<i64>,
    pub avg_weight_grams: Option<f64>,
    pub min_weight_grams: Option<i32>,
    pub max_weight_grams: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct PriceBand {
    pub band: String,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PriceStats {
    pub overview: PriceOverview,
    pub bands: Vec<PriceBand>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ArticleList {
    #[schema(value_type = Vec<Article>)]
    pub items: Vec<Article>,
}

#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct ArticleTotals {
    pub total_articles: i64,
    pub total_authors: i64,
    pub first_published: Option<NaiveDate>,
    pub last_published: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleSummary {
    pub totals: ArticleTotals,
    pub recent: Vec<Article>,
}
