//! Announcement endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use parish_common::AppResult;
use parish_core::{AnnouncementInput, SummaryTile};
use parish_db::entities::announcement;
use tracing::{debug, info};

use super::SearchQuery;
use crate::{
    extractors::{AuthUser, Json, Query},
    middleware::AppState,
    response::{ApiResponse, Deleted},
};

/// Create announcement router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_announcements).post(create_announcement))
        .route("/summary", get(summary))
        .route(
            "/{id}",
            get(get_announcement)
                .put(replace_announcement)
                .delete(delete_announcement),
        )
}

/// List announcements, filtered by `?q=`.
async fn list_announcements(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<Vec<announcement::Model>>> {
    debug!(user_id = %user.id, q = ?query.q, "Listing announcements");

    let announcements = state
        .announcement_service
        .list(query.q.as_deref())
        .await?;
    Ok(ApiResponse::ok(announcements))
}

async fn summary(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<SummaryTile>>> {
    Ok(ApiResponse::ok(state.announcement_service.summary().await?))
}

/// Get a single announcement.
async fn get_announcement(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<announcement::Model>> {
    Ok(ApiResponse::ok(state.announcement_service.get(&id).await?))
}

/// Create an announcement authored by the caller.
async fn create_announcement(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<AnnouncementInput>,
) -> AppResult<ApiResponse<announcement::Model>> {
    info!(user_id = %user.id, title = %req.title, "Creating announcement");

    let announcement = state
        .announcement_service
        .create(req, Some(&user.display_name))
        .await?;
    Ok(ApiResponse::ok(announcement))
}

/// Replace an announcement.
async fn replace_announcement(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AnnouncementInput>,
) -> AppResult<ApiResponse<announcement::Model>> {
    info!(user_id = %user.id, announcement_id = %id, "Replacing announcement");

    let announcement = state.announcement_service.replace(&id, req).await?;
    Ok(ApiResponse::ok(announcement))
}

/// Delete an announcement.
async fn delete_announcement(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Deleted>> {
    info!(user_id = %user.id, announcement_id = %id, "Deleting announcement");

    state.announcement_service.delete(&id).await?;
    Ok(ApiResponse::ok(Deleted::new(id)))
}
