//! Holiday endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use parish_common::AppResult;
use parish_core::{HolidayInput, SummaryTile};
use parish_db::entities::holiday;
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

/// List holidays, filtered by `?q=`.
async fn list(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<Vec<holiday::Model>>> {
    Ok(ApiResponse::ok(state.holiday_service.list(query.q.as_deref()).await?))
}

async fn summary(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<SummaryTile>>> {
    Ok(ApiResponse::ok(state.holiday_service.summary().await?))
}

async fn get_one(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<holiday::Model>> {
    Ok(ApiResponse::ok(state.holiday_service.get(&id).await?))
}

async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<HolidayInput>,
) -> AppResult<ApiResponse<holiday::Model>> {
    let created = state.holiday_service.create(req).await?;

    info!(user_id = %user.id, holiday_id = %created.id, name = %created.name, "Adding holiday");
    Ok(ApiResponse::ok(created))
}

async fn replace(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<HolidayInput>,
) -> AppResult<ApiResponse<holiday::Model>> {
    info!(user_id = %user.id, holiday_id = %id, "Replacing holiday");

    Ok(ApiResponse::ok(state.holiday_service.replace(&id, req).await?))
}

async fn remove(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Deleted>> {
    info!(user_id = %user.id, holiday_id = %id, "Deleting holiday");

    state.holiday_service.delete(&id).await?;
    Ok(ApiResponse::ok(Deleted::new(id)))
}
