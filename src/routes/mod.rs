use std::time::Duration;

use axum::{
    Router, middleware,
    http::{HeaderName, HeaderValue, Request, Response, Uri},
    routing::get,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::AppConfig,
    error::{AppError, reveal_internal_details},
    state::AppState,
};

pub mod articles;
pub mod bookings;
pub mod courts;
pub mod doc;
pub mod health;
pub mod paddles;
pub mod params;
pub mod tournaments;
pub mod users;

const REQUEST_ID_HEADER: &str = "x-request-id";
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/bookings", bookings::router())
        .nest("/courts", courts::router())
        .nest("/tournaments", tournaments::router())
        .nest("/paddles", paddles::router())
        .nest("/articles", articles::router())
}

/// Full application: health probes, `/api`, docs and the tower layer stack.
pub fn build_app(state: AppState, config: &AppConfig) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        })
        .on_request(|request: &Request<_>, _span: &tracing::Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "request started"
            );
        })
        .on_response(|response: &Response<_>, latency: Duration, _span: &tracing::Span| {
            tracing::info!(
                status = %response.status(),
                ms = %latency.as_millis(),
                "request finished"
            );
        });

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .layer(middleware::map_response_with_state(
            config.app_env.is_development(),
            reveal_internal_details,
        ))
        .layer(trace_layer)
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors_layer(&config.cors_origins))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(ConcurrencyLimitLayer::new(config.max_concurrent_requests))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("Route {} not found", uri.path()))
}
