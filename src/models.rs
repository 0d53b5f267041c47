use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub const ACTIVE: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Confirmed];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Pending and confirmed bookings hold their slot; cancelled ones do not.
    pub fn is_active(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            other => Err(format!(
                "Invalid booking status '{other}', expected pending, confirmed or cancelled"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    pub court_name: String,
    pub player_name: String,
    pub start_time: DateTime<Utc>,
    pub duration_hours: f64,
    pub status: BookingStatus,
    pub price_cents: i64,
    pub owner_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Court {
    pub id: Uuid,
    pub name: String,
    pub surface: String,
    pub covered: bool,
    pub active: bool,
    pub price_per_hour_cents: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlayerLevel {
    Beginner,
    Intermediate,
    Advanced,
    Professional,
}

impl PlayerLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerLevel::Beginner => "beginner",
            PlayerLevel::Intermediate => "intermediate",
            PlayerLevel::Advanced => "advanced",
            PlayerLevel::Professional => "professional",
        }
    }
}

impl FromStr for PlayerLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(PlayerLevel::Beginner),
            "intermediate" => Ok(PlayerLevel::Intermediate),
            "advanced" => Ok(PlayerLevel::Advanced),
            "professional" => Ok(PlayerLevel::Professional),
            other => Err(format!("Invalid player level '{other}'")),
        }
    }
}

/// A user as exposed by the API. The password hash never leaves the store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub level: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Tournament {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub status: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub max_teams: Option<i32>,
    pub entry_fee_cents: i64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Paddle {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub price_cents: i64,
    pub weight_grams: i32,
    pub balance: String,
    pub shape: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub author_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Confirmed".parse::<BookingStatus>(), Ok(BookingStatus::Confirmed));
        assert_eq!("canceled".parse::<BookingStatus>(), Ok(BookingStatus::Cancelled));
        assert!("archived".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn only_cancelled_is_inactive() {
        assert!(BookingStatus::Pending.is_active());
        assert!(BookingStatus::Confirmed.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
    }
}
