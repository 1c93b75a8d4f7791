//! Booking endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use parish_common::AppResult;
use parish_core::{BookingInput, SummaryTile};
use parish_db::entities::booking;
use tracing::info;

use super::SearchQuery;
use crate::{
    extractors::{AuthUser, Json, Query},
    middleware::AppState,
    response::{ApiResponse, Deleted},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/summary", get(summary))
        .route("/{id}", get(get_one).put(replace).delete(remove))
}

/// List bookings, filtered by `?q=`.
async fn list(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<Vec<booking::Model>>> {
    Ok(ApiResponse::ok(state.booking_service.list(query.q.as_deref()).await?))
}

async fn summary(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<SummaryTile>>> {
    Ok(ApiResponse::ok(state.booking_service.summary().await?))
}

async fn get_one(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<booking::Model>> {
    Ok(ApiResponse::ok(state.booking_service.get(&id).await?))
}

async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<BookingInput>,
) -> AppResult<ApiResponse<booking::Model>> {
    let created = state.booking_service.create(req).await?;

    info!(user_id = %user.id, booking_id = %created.id, member_name = %created.member_name, "Recording booking");
    Ok(ApiResponse::ok(created))
}

async fn replace(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<BookingInput>,
) -> AppResult<ApiResponse<booking::Model>> {
    info!(user_id = %user.id, booking_id = %id, "Replacing booking");

    Ok(ApiResponse::ok(state.booking_service.replace(&id, req).await?))
}

async fn remove(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Deleted>> {
    info!(user_id = %user.id, booking_id = %id, "Deleting booking");

    state.booking_service.delete(&id).await?;
    Ok(ApiResponse::ok(Deleted::new(id)))
}
