use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self { page, per_page }
    }

    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1).saturating_mul(per_page);
        (page, per_page, offset)
    }
}

// Paging fields are repeated in every query instead of `#[serde(flatten)]`:
// flattened query strings lose their numeric types.

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// pending, confirmed or cancelled.
    pub status: Option<String>,
    /// Case-insensitive substring of the court name.
    pub court: Option<String>,
    /// Case-insensitive substring of the player name.
    pub player: Option<String>,
    pub owner_email: Option<String>,
    /// Earliest start time, inclusive.
    pub from: Option<String>,
    /// Latest start time, inclusive.
    pub to: Option<String>,
}

impl BookingListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// Start of the slot, or just the day when `time` is given.
    pub date: Option<String>,
    /// Time of day, `HH:MM`.
    pub time: Option<String>,
    /// Hours, defaults to 1.
    pub duration: Option<f64>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourtQuery {
    /// Defaults to true.
    pub active: Option<bool>,
    pub surface: Option<String>,
    pub covered: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TournamentQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub category: Option<String>,
}

impl TournamentQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub level: Option<String>,
    /// Defaults to true.
    pub active: Option<bool>,
}

impl UserQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaddleQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Case-insensitive substring of the brand.
    pub brand: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_weight: Option<i32>,
    pub max_weight: Option<i32>,
    pub balance: Option<String>,
    pub shape: Option<String>,
}

impl PaddleQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArticleQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Substring of the title or the content.
    pub search: Option<String>,
}

impl ArticleQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}
