//! Read-only access to the paddle and article catalog.
//!
//! Filters are bound as nullable parameters so each query stays a single
//! prepared statement whatever combination the client sends.

use crate::{
    dto::catalog::{
        ArticleList, ArticleSummary, ArticleTotals, BrandStats, PaddleList, PriceBand,
        PriceOverview, PriceStats,
    },
    error::{AppError, AppResult},
    models::{Article, Paddle},
    response::{ApiResponse, Meta},
    routes::params::{ArticleQuery, PaddleQuery},
    state::AppState,
};

const RECENT_ARTICLES: i64 = 5;

const PADDLE_FILTER: &str = r#"
    WHERE ($1::text IS NULL OR brand ILIKE '%' || $1 || '%')
      AND ($2::bigint IS NULL OR price_cents >= $2)
      AND ($3::bigint IS NULL OR price_cents <= $3)
      AND ($4::int IS NULL OR weight_grams >= $4)
      AND ($5::int IS NULL OR weight_grams <= $5)
      AND ($6::text IS NULL OR balance = $6)
      AND ($7::text IS NULL OR shape = $7)
"#;

const ARTICLE_FILTER: &str = r#"
    WHERE ($1::text IS NULL OR title ILIKE '%' || $1 || '%' OR content ILIKE '%' || $1 || '%')
"#;

fn text_filter(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub async fn list_paddles(
    state: &AppState,
    query: PaddleQuery,
) -> AppResult<ApiResponse<PaddleList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let brand = text_filter(&query.brand);
    let balance = text_filter(&query.balance);
    let shape = text_filter(&query.shape);

    let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM paddles {PADDLE_FILTER}"))
        .bind(&brand)
        .bind(query.min_price)
        .bind(query.max_price)
        .bind(query.min_weight)
        .bind(query.max_weight)
        .bind(&balance)
        .bind(&shape)
        .fetch_one(&state.catalog)
        .await?;

    let items = sqlx::query_as::<_, Paddle>(&format!(
        "SELECT id, brand, model, price_cents, weight_grams, balance, shape, description, image, created_at \
         FROM paddles {PADDLE_FILTER} ORDER BY brand, model LIMIT $8 OFFSET $9"
    ))
    .bind(&brand)
    .bind(query.min_price)
    .bind(query.max_price)
    .bind(query.min_weight)
    .bind(query.max_weight)
    .bind(&balance)
    .bind(&shape)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.catalog)
    .await?;

    Ok(ApiResponse::success(
        "Paddles",
        PaddleList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_paddle(state: &AppState, id: i64) -> AppResult<ApiResponse<Paddle>> {
    let paddle = sqlx::query_as::<_, Paddle>(
        "SELECT id, brand, model, price_cents, weight_grams, balance, shape, description, image, created_at \
         FROM paddles WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&state.catalog)
    .await?
    .ok_or_else(|| AppError::not_found("Paddle not found"))?;
    Ok(ApiResponse::success("Paddle", paddle, Some(Meta::empty())))
}

pub async fn brand_stats(state: &AppState) -> AppResult<ApiResponse<Vec<BrandStats>>> {
    let stats = sqlx::query_as::<_, BrandStats>(
        r#"
        SELECT brand,
               COUNT(*) AS count,
               AVG(price_cents)::float8 AS avg_price_cents,
               MIN(price_cents) AS min_price_cents,
               MAX(price_cents) AS max_price_cents
        FROM paddles
        GROUP BY brand
        ORDER BY count DESC, brand
        "#,
    )
    .fetch_all(&state.catalog)
    .await?;
    Ok(ApiResponse::success("Paddle brands", stats, Some(Meta::empty())))
}

pub async fn price_stats(state: &AppState) -> AppResult<ApiResponse<PriceStats>> {
    let overview = sqlx::query_as::<_, PriceOverview>(
        r#"
        SELECT COUNT(*) AS total_paddles,
               AVG(price_cents)::float8 AS avg_price_cents,
               MIN(price_cents) AS min_price_cents,
               MAX(price_cents) AS max_price_cents,
               AVG(weight_grams)::float8 AS avg_weight_grams,
               MIN(weight_grams) AS min_weight_grams,
               MAX(weight_grams) AS max_weight_grams
        FROM paddles
        "#,
    )
    .fetch_one(&state.catalog)
    .await?;

    // Band edges are inclusive on both sides below 190.00, first match wins.
    let bands = sqlx::query_as::<_, PriceBand>(
        r#"
        SELECT band, COUNT(*) AS count
        FROM (
            SELECT CASE
                WHEN price_cents < 13000 THEN 'budget'
                WHEN price_cents <= 16000 THEN 'mid_range'
                WHEN price_cents <= 19000 THEN 'premium'
                ELSE 'professional'
            END AS band,
            CASE
                WHEN price_cents < 13000 THEN 1
                WHEN price_cents <= 16000 THEN 2
                WHEN price_cents <= 19000 THEN 3
                ELSE 4
            END AS band_order
            FROM paddles
        ) banded
        GROUP BY band, band_order
        ORDER BY band_order
        "#,
    )
    .fetch_all(&state.catalog)
    .await?;

    Ok(ApiResponse::success(
        "Paddle prices",
        PriceStats { overview, bands },
        Some(Meta::empty()),
    ))
}

pub async fn list_articles(
    state: &AppState,
    query: ArticleQuery,
) -> AppResult<ApiResponse<ArticleList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let search = text_filter(&query.search);

    let total: i64 =
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM articles {ARTICLE_FILTER}"))
            .bind(&search)
            .fetch_one(&state.catalog)
            .await?;

    let items = sqlx::query_as::<_, Article>(&format!(
        "SELECT id, title, content, image, author_id, created_at FROM articles {ARTICLE_FILTER} \
         ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
    ))
    .bind(&search)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.catalog)
    .await?;

    Ok(ApiResponse::success(
        "Articles",
        ArticleList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_article(state: &AppState, id: i64) -> AppResult<ApiResponse<Article>> {
    let article = sqlx::query_as::<_, Article>(
        "SELECT id, title, content, image, author_id, created_at FROM articles WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&state.catalog)
    .await?
    .ok_or_else(|| AppError::not_found("Article not found"))?;
    Ok(ApiResponse::success("Article", article, Some(Meta::empty())))
}

pub async fn article_summary(state: &AppState) -> AppResult<ApiResponse<ArticleSummary>> {
    let totals = sqlx::query_as::<_, ArticleTotals>(
        r#"
        SELECT COUNT(*) AS total_articles,
               COUNT(DISTINCT author_id) AS total_authors,
               MIN(DATE(created_at)) AS first_published,
               MAX(DATE(created_at)) AS last_published
        FROM articles
        "#,
    )
    .fetch_one(&state.catalog)
    .await?;

    let recent = sqlx::query_as::<_, Article>(
        "SELECT id, title, content, image, author_id, created_at FROM articles \
         ORDER BY created_at DESC, id DESC LIMIT $1",
    )
    .bind(RECENT_ARTICLES)
    .fetch_all(&state.catalog)
    .await?;

    Ok(ApiResponse::success(
        "Articles summary",
        ArticleSummary { totals, recent },
        Some(Meta::empty()),
    ))
}
