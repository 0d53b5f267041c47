use padel_club_api::{
    config::AppConfig,
    db::{CATALOG_MIGRATIONS, DYNAMIC_MIGRATIONS, create_orm_conn, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm, DYNAMIC_MIGRATIONS).await?;
    println!("Bookings store migrations applied");

    let catalog = create_orm_conn(&config.catalog_database_url).await?;
    run_migrations(&catalog, CATALOG_MIGRATIONS).await?;
    println!("Catalog migrations applied");
    Ok(())
}
