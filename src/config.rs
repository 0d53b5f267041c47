use std::env;

use anyhow::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => AppEnv::Development,
            _ => AppEnv::Production,
        }
    }

    pub fn is_development(self) -> bool {
        self == AppEnv::Development
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// Falls back to `database_url` when the catalog lives in the same database.
    pub catalog_database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub app_env: AppEnv,
    pub cors_origins: Vec<String>,
    pub max_concurrent_requests: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL is not set")?;
        let catalog_database_url = lookup("CATALOG_DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| database_url.clone());
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .context("JWT_SECRET is not set")?;

        let host = lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("APP_PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_ttl_hours = lookup("JWT_TTL_HOURS")
            .and_then(|h| h.parse::<i64>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(168);
        let app_env = lookup("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Production);
        let cors_origins = lookup("CORS_ORIGIN")
            .unwrap_or_else(|| "http://localhost:8080".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        let max_concurrent_requests = lookup("MAX_CONCURRENT_REQUESTS")
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(100);

        Ok(Self {
            database_url,
            catalog_database_url,
            host,
            port,
            jwt_secret,
            jwt_ttl_hours,
            app_env,
            cors_origins,
            max_concurrent_requests,
        })
    }
}
