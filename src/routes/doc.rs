use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        bookings::{
            AvailabilityResponse, BookingDashboard, BookingList, CourtSummary,
            CreateBookingRequest, DeletedBooking, StatusSummary, UpdateBookingRequest,
            WeekdaySummary,
        },
        catalog::{
            ArticleList, ArticleSummary, ArticleTotals, BrandStats, PaddleList, PriceBand,
            PriceOverview, PriceStats,
        },
        directory::{CourtList, LevelCount, LevelStats, TournamentList, UserList},
    },
    models::{Article, Booking, BookingStatus, Court, Paddle, Tournament, User},
    response::{ApiResponse, ErrorResponse, Meta},
    routes::{articles, bookings, courts, health, paddles, params, tournaments, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::readiness_check,
        users::register,
        users::login,
        users::logout,
        users::profile,
        users::list_users,
        users::get_user,
        users::level_stats,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::create_booking,
        bookings::update_booking,
        bookings::delete_booking,
        bookings::dashboard,
        courts::list_courts,
        courts::get_court,
        courts::court_availability,
        tournaments::list_tournaments,
        tournaments::upcoming_tournaments,
        tournaments::get_tournament,
        paddles::list_paddles,
        paddles::get_paddle,
        paddles::brand_stats,
        paddles::price_stats,
        articles::list_articles,
        articles::get_article,
        articles::article_summary
    ),
    components(
        schemas(
            User,
            Booking,
            BookingStatus,
            Court,
            Tournament,
            Paddle,
            Article,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            CreateBookingRequest,
            UpdateBookingRequest,
            BookingList,
            AvailabilityResponse,
            DeletedBooking,
            StatusSummary,
            CourtSummary,
            WeekdaySummary,
            BookingDashboard,
            CourtList,
            TournamentList,
            UserList,
            LevelCount,
            LevelStats,
            PaddleList,
            BrandStats,
            PriceOverview,
            PriceBand,
            PriceStats,
            ArticleList,
            ArticleTotals,
            ArticleSummary,
            params::Pagination,
            Meta,
            ErrorResponse,
            ApiResponse<Booking>,
            ApiResponse<BookingList>,
            ApiResponse<AvailabilityResponse>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Users", description = "Registration, login and player directory"),
        (name = "Bookings", description = "Court bookings and availability"),
        (name = "Courts", description = "Courts and slot availability"),
        (name = "Tournaments", description = "Club tournaments"),
        (name = "Catalog", description = "Paddle catalog and articles"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
