use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::catalog::{ArticleList, ArticleSummary},
    error::AppResult,
    extract::{AppPath, AppQuery},
    models::Article,
    response::ApiResponse,
    routes::params::ArticleQuery,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_articles))
        .route("/stats/summary", get(article_summary))
        .route("/{id}", get(get_article))
}

#[utoipa::path(
    get,
    path = "/api/articles",
    params(ArticleQuery),
    responses(
        (status = 200, description = "List articles, newest first", body = ApiResponse<ArticleList>)
    ),
    tag = "Catalog"
)]
pub async fn list_articles(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ArticleQuery>,
) -> AppResult<Json<ApiResponse<ArticleList>>> {
    let resp = catalog_service::list_articles(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    params(
        ("id" = i64, Path, description = "Article ID")
    ),
    responses(
        (status = 200, description = "Get article", body = ApiResponse<Article>),
        (status = 404, description = "Article not found")
    ),
    tag = "Catalog"
)]
pub async fn get_article(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<ApiResponse<Article>>> {
    let resp = catalog_service::get_article(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/articles/stats/summary",
    responses(
        (status = 200, description = "Article totals and the latest five", body = ApiResponse<ArticleSummary>)
    ),
    tag = "Catalog"
)]
pub async fn article_summary(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ArticleSummary>>> {
    let resp = catalog_service::article_summary(&state).await?;
    Ok(Json(resp))
}
