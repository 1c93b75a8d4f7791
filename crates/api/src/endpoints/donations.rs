//! Donation endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use parish_common::AppResult;
use parish_core::{DonationInput, SummaryTile};
use parish_db::entities::donation;
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

/// List donations, filtered by `?q=`.
async fn list(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<Vec<donation::Model>>> {
    Ok(ApiResponse::ok(state.donation_service.list(query.q.as_deref()).await?))
}

async fn summary(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<SummaryTile>>> {
    Ok(ApiResponse::ok(state.donation_service.summary().await?))
}

async fn get_one(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<donation::Model>> {
    Ok(ApiResponse::ok(state.donation_service.get(&id).await?))
}

async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DonationInput>,
) -> AppResult<ApiResponse<donation::Model>> {
    let created = state.donation_service.create(req).await?;

    info!(user_id = %user.id, donation_id = %created.id, donor = %created.donor, "Recording donation");
    Ok(ApiResponse::ok(created))
}

async fn replace(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<DonationInput>,
) -> AppResult<ApiResponse<donation::Model>> {
    info!(user_id = %user.id, donation_id = %id, "Replacing donation");

    Ok(ApiResponse::ok(state.donation_service.replace(&id, req).await?))
}

async fn remove(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Deleted>> {
    info!(user_id = %user.id, donation_id = %id, "Deleting donation");

    state.donation_service.delete(&id).await?;
    Ok(ApiResponse::ok(Deleted::new(id)))
}
