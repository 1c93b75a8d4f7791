//! API endpoints.

mod account;
mod admins;
mod announcements;
mod auth;
mod bookings;
mod dashboard;
mod donations;
mod holidays;
mod members;
mod messages;
mod payments;
mod services;

use axum::Router;
use serde::Deserialize;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/i", account::router())
        .nest("/admins", admins::router())
        .nest("/dashboard", dashboard::router())
        .nest("/announcements", announcements::router())
        .nest("/members", members::router())
        .nest("/bookings", bookings::router())
        .nest("/donations", donations::router())
        .nest("/payments", payments::router())
        .nest("/holidays", holidays::router())
        .nest("/services", services::router())
        .nest("/messages", messages::router())
}

/// `?q=` search box shared by every collection listing.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}
