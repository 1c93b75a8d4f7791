//! HTTP API layer for parish-admin.
//!
//! This crate provides the JSON API consumed by the dashboard:
//!
//! - **Endpoints**: one module per collection, plus accounts and the overview
//! - **Extractors**: session and administrator gates
//! - **Middleware**: bearer-token session lookup
//!
//! Built on Axum 0.8.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::{AppState, auth_middleware};
