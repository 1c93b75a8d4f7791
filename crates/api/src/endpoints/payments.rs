//! Payment endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use parish_common::AppResult;
use parish_core::{PaymentInput, SummaryTile};
use parish_db::entities::payment;
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

/// List payments, filtered by `?q=`.
async fn list(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<Vec<payment::Model>>> {
    Ok(ApiResponse::ok(state.payment_service.list(query.q.as_deref()).await?))
}

async fn summary(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<SummaryTile>>> {
    Ok(ApiResponse::ok(state.payment_service.summary().await?))
}

async fn get_one(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<payment::Model>> {
    Ok(ApiResponse::ok(state.payment_service.get(&id).await?))
}

async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<PaymentInput>,
) -> AppResult<ApiResponse<payment::Model>> {
    let created = state.payment_service.create(req).await?;

    info!(user_id = %user.id, payment_id = %created.id, member = %created.member, "Recording payment");
    Ok(ApiResponse::ok(created))
}

async fn replace(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<PaymentInput>,
) -> AppResult<ApiResponse<payment::Model>> {
    info!(user_id = %user.id, payment_id = %id, "Replacing payment");

    Ok(ApiResponse::ok(state.payment_service.replace(&id, req).await?))
}

async fn remove(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Deleted>> {
    info!(user_id = %user.id, payment_id = %id, "Deleting payment");

    state.payment_service.delete(&id).await?;
    Ok(ApiResponse::ok(Deleted::new(id)))
}
