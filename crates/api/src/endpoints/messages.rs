//! Inbox endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::{get, post},
};
use parish_common::AppResult;
use parish_core::{MessageInput, ReplyInput, SummaryTile};
use parish_db::entities::message::{self, MessageStatus};
use serde::Deserialize;
use tracing::info;

use crate::{
    extractors::{AuthUser, Json, Query},
    middleware::AppState,
    response::{ApiResponse, Deleted},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_messages).post(create_message))
        .route("/summary", get(summary))
        .route(
            "/{id}",
            get(get_message).put(replace_message).delete(delete_message),
        )
        .route("/{id}/read", post(mark_read))
        .route("/{id}/reply", post(reply))
}

/// Inbox listing query.
#[derive(Debug, Deserialize)]
pub struct ListMessagesQuery {
    pub q: Option<String>,
    pub status: Option<MessageStatus>,
}

/// List messages by subject, sender or content, optionally in one state.
async fn list_messages(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListMessagesQuery>,
) -> AppResult<ApiResponse<Vec<message::Model>>> {
    let messages = state
        .message_service
        .list(query.q.as_deref(), query.status)
        .await?;
    Ok(ApiResponse::ok(messages))
}

async fn summary(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<SummaryTile>>> {
    Ok(ApiResponse::ok(state.message_service.summary().await?))
}

async fn get_message(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<message::Model>> {
    Ok(ApiResponse::ok(state.message_service.get(&id).await?))
}

async fn create_message(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<MessageInput>,
) -> AppResult<ApiResponse<message::Model>> {
    let message = state.message_service.create(req).await?;

    info!(user_id = %user.id, message_id = %message.id, "Message filed");
    Ok(ApiResponse::ok(message))
}

async fn replace_message(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MessageInput>,
) -> AppResult<ApiResponse<message::Model>> {
    info!(user_id = %user.id, message_id = %id, "Replacing message");

    Ok(ApiResponse::ok(state.message_service.replace(&id, req).await?))
}

async fn delete_message(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Deleted>> {
    info!(user_id = %user.id, message_id = %id, "Deleting message");

    state.message_service.delete(&id).await?;
    Ok(ApiResponse::ok(Deleted::new(id)))
}

/// Mark a message read.
async fn mark_read(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<message::Model>> {
    info!(user_id = %user.id, message_id = %id, "Marking message read");

    Ok(ApiResponse::ok(state.message_service.mark_read(&id).await?))
}

/// Reply to a message.
async fn reply(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ReplyInput>,
) -> AppResult<ApiResponse<message::Model>> {
    info!(user_id = %user.id, message_id = %id, "Replying to message");

    Ok(ApiResponse::ok(state.message_service.reply(&id, req).await?))
}
