//! API response types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Standard API response wrapper.
///
/// Errors never pass through here; `AppError` renders its own
/// `{"error": {...}}` body.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response.
    pub const fn ok(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Body returned after a delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: String,
    pub deleted: bool,
}

impl Deleted {
    /// Acknowledge removal of `id`.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self { id, deleted: true }
    }
}

/// Body returned by actions with nothing else to report.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    /// Successful acknowledgement.
    #[must_use]
    pub const fn ok() -> Self {
        Self { ok: true }
    }
}
