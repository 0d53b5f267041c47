use std::{net::SocketAddr, sync::Arc};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use padel_club_api::{
    config::AppConfig,
    db::{CATALOG_MIGRATIONS, DYNAMIC_MIGRATIONS, create_orm_conn, create_pool, run_migrations},
    middleware::auth::JwtKeys,
    routes::build_app,
    services::booking_service::BookingService,
    state::AppState,
    store::{SeaOrmBookingStore, SeaOrmCourtStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,padel_club_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    let catalog = create_pool(&config.catalog_database_url).await?;
    let orm = create_orm_conn(&config.database_url).await?;

    run_migrations(&orm, DYNAMIC_MIGRATIONS).await?;
    run_migrations(
        &create_orm_conn(&config.catalog_database_url).await?,
        CATALOG_MIGRATIONS,
    )
    .await?;

    let bookings = BookingService::new(
        Arc::new(SeaOrmBookingStore::new(orm.clone())),
        Arc::new(SeaOrmCourtStore::new(orm.clone())),
    );
    let state = AppState {
        pool,
        catalog,
        orm,
        bookings,
        jwt: JwtKeys::new(&config.jwt_secret, config.jwt_ttl_hours),
    };

    let app = build_app(state, &config);

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!(env = ?config.app_env, "listening on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
