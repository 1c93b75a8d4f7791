//! Service catalog endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use parish_common::AppResult;
use parish_core::{ServiceInput, SummaryTile};
use parish_db::entities::service;
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

/// List services, filtered by `?q=`.
async fn list(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<Vec<service::Model>>> {
    Ok(ApiResponse::ok(state.catalog_service.list(query.q.as_deref()).await?))
}

async fn summary(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<SummaryTile>>> {
    Ok(ApiResponse::ok(state.catalog_service.summary().await?))
}

async fn get_one(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<service::Model>> {
    Ok(ApiResponse::ok(state.catalog_service.get(&id).await?))
}

async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ServiceInput>,
) -> AppResult<ApiResponse<service::Model>> {
    let created = state.catalog_service.create(req).await?;

    info!(user_id = %user.id, service_id = %created.id, title = %created.title, "Adding service");
    Ok(ApiResponse::ok(created))
}

async fn replace(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ServiceInput>,
) -> AppResult<ApiResponse<service::Model>> {
    info!(user_id = %user.id, service_id = %id, "Replacing service");

    Ok(ApiResponse::ok(state.catalog_service.replace(&id, req).await?))
}

async fn remove(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Deleted>> {
    info!(user_id = %user.id, service_id = %id, "Deleting service");

    state.catalog_service.delete(&id).await?;
    Ok(ApiResponse::ok(Deleted::new(id)))
}
