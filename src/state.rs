use axum::extract::FromRef;

use crate::{
    db::{DbPool, OrmConn},
    middleware::auth::JwtKeys,
    services::booking_service::BookingService,
};

#[derive(Clone)]
pub struct AppState {
    /// Dynamic store, raw SQL access (audit trail, readiness).
    pub pool: DbPool,
    /// Static catalog: paddles and articles.
    pub catalog: DbPool,
    pub orm: OrmConn,
    pub bookings: BookingService,
    pub jwt: JwtKeys,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
