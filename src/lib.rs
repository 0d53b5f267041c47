pub mod audit;
pub mod availability;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod extract;
pub mod models;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub mod dto {
    pub mod auth;
    pub mod bookings;
    pub mod catalog;
    pub mod directory;
}

pub mod middleware {
    pub mod auth;
}

pub mod services {
    pub mod auth_service;
    pub mod booking_service;
    pub mod catalog_service;
    pub mod court_service;
    pub mod tournament_service;
    pub mod user_service;
}
