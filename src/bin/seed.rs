use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use padel_club_api::{
    config::AppConfig,
    db::{
        CATALOG_MIGRATIONS, DYNAMIC_MIGRATIONS, create_orm_conn, create_pool, run_migrations,
    },
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    // Ensure both schemas exist.
    run_migrations(&create_orm_conn(&config.database_url).await?, DYNAMIC_MIGRATIONS).await?;
    run_migrations(
        &create_orm_conn(&config.catalog_database_url).await?,
        CATALOG_MIGRATIONS,
    )
    .await?;

    let pool = create_pool(&config.database_url).await?;
    let catalog = create_pool(&config.catalog_database_url).await?;

    seed_courts(&pool).await?;
    let user_id = ensure_user(&pool, "Demo Player", "demo@padel.club", "demo1234").await?;
    seed_tournaments(&pool).await?;
    seed_paddles(&catalog).await?;
    seed_articles(&catalog).await?;

    println!("Seed completed. Demo user ID: {user_id}");
    Ok(())
}

async fn seed_courts(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let courts = [
        ("Central", "glass", true, 2500_i64),
        ("Norte", "glass", false, 2000),
        ("Sur", "wall", false, 1500),
    ];

    for (name, surface, covered, price) in courts {
        sqlx::query(
            r#"
            INSERT INTO courts (id, name, surface, covered, price_per_hour_cents)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(surface)
        .bind(covered)
        .bind(price)
        .execute(pool)
        .await?;
    }

    println!("Seeded courts");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, password_hash, level)
        VALUES ($1, $2, $3, $4, 'intermediate')
        ON CONFLICT (email) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_optional(pool)
    .await?;

    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {email}");
    Ok(user_id)
}

async fn seed_tournaments(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let now = Utc::now();
    let tournaments = [
        ("Spring Open", "mixed", "open", now + Duration::days(14), 16, 3000_i64),
        ("Club Masters", "men", "scheduled", now + Duration::days(45), 8, 5000),
        ("Winter Cup", "women", "finished", now - Duration::days(60), 12, 2500),
    ];

    for (name, category, status, starts_at, max_teams, fee) in tournaments {
        sqlx::query(
            r#"
            INSERT INTO tournaments (id, name, category, status, starts_at, ends_at, max_teams, entry_fee_cents)
            SELECT $1, $2, $3, $4, $5, $6, $7, $8
            WHERE NOT EXISTS (SELECT 1 FROM tournaments WHERE name = $2)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(category)
        .bind(status)
        .bind(starts_at)
        .bind(starts_at + Duration::days(2))
        .bind(max_teams)
        .bind(fee)
        .execute(pool)
        .await?;
    }

    println!("Seeded tournaments");
    Ok(())
}

async fn seed_paddles(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let paddles = [
        ("Bullpadel", "Vertex 04", 27995_i64, 370, "high", "diamond"),
        ("Bullpadel", "Hack 03", 24995, 365, "high", "diamond"),
        ("Head", "Delta Pro", 18995, 365, "medium", "teardrop"),
        ("Nox", "AT10 Genius", 22995, 365, "medium", "teardrop"),
        ("Babolat", "Contact", 9995, 350, "low", "round"),
        ("Adidas", "Match 3.2", 14995, 360, "medium", "round"),
    ];

    for (brand, model, price, weight, balance, shape) in paddles {
        sqlx::query(
            r#"
            INSERT INTO paddles (brand, model, price_cents, weight_grams, balance, shape)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (brand, model) DO NOTHING
            "#,
        )
        .bind(brand)
        .bind(model)
        .bind(price)
        .bind(weight)
        .bind(balance)
        .bind(shape)
        .execute(pool)
        .await?;
    }

    println!("Seeded paddles");
    Ok(())
}

async fn seed_articles(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let articles = [
        (
            "Choosing your first paddle",
            "Round paddles with a low balance forgive off-centre hits and suit new players.",
            1_i64,
        ),
        (
            "Mastering the bandeja",
            "Keep the ball deep and the net position safe with a controlled overhead slice.",
            2,
        ),
        (
            "Glass walls and how to read them",
            "Let the ball come off the back glass before you commit to the return.",
            1,
        ),
    ];

    for (title, content, author_id) in articles {
        sqlx::query(
            r#"
            INSERT INTO articles (title, content, author_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (title) DO NOTHING
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(author_id)
        .execute(pool)
        .await?;
    }

    println!("Seeded articles");
    Ok(())
}
