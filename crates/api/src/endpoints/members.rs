//! Member register and intake wizard endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::{get, post},
};
use parish_common::AppResult;
use parish_core::{CreateMemberInput, IntakeOutcome, IntakeView, SummaryTile};
use parish_db::entities::member;
use serde_json::{Map, Value};
use tracing::info;

use super::SearchQuery;
use crate::{
    extractors::{AuthUser, Json, Query},
    middleware::AppState,
    response::{ApiResponse, Deleted},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_members).post(create_member))
        .route("/summary", get(summary))
        .route("/intake", post(start_intake))
        .route(
            "/intake/{id}",
            get(get_intake).post(submit_intake_step).delete(discard_intake),
        )
        .route("/intake/{id}/back", post(intake_back))
        .route(
            "/{id}",
            get(get_member).put(replace_member).delete(delete_member),
        )
}

/// List members by name or e-mail.
async fn list_members(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<Vec<member::Model>>> {
    let members = state.member_service.list(query.q.as_deref()).await?;
    Ok(ApiResponse::ok(members))
}

async fn summary(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<SummaryTile>>> {
    Ok(ApiResponse::ok(state.member_service.summary().await?))
}

async fn get_member(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<member::Model>> {
    Ok(ApiResponse::ok(state.member_service.get(&id).await?))
}

/// Register a member in one request.
async fn create_member(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateMemberInput>,
) -> AppResult<ApiResponse<member::Model>> {
    let member = state.member_service.create(req).await?;

    info!(user_id = %user.id, member_id = %member.id, "Member registered");
    Ok(ApiResponse::ok(member))
}

async fn replace_member(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CreateMemberInput>,
) -> AppResult<ApiResponse<member::Model>> {
    info!(user_id = %user.id, member_id = %id, "Replacing member");

    Ok(ApiResponse::ok(state.member_service.replace(&id, req).await?))
}

async fn delete_member(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Deleted>> {
    info!(user_id = %user.id, member_id = %id, "Deleting member");

    state.member_service.delete(&id).await?;
    Ok(ApiResponse::ok(Deleted::new(id)))
}

/// Open a new intake draft.
async fn start_intake(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<IntakeView>> {
    let view = state.member_intake_service.start().await;

    info!(user_id = %user.id, intake_id = %view.id, "Intake started");
    Ok(ApiResponse::ok(view))
}

async fn get_intake(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<IntakeView>> {
    Ok(ApiResponse::ok(state.member_intake_service.get(&id).await?))
}

/// Submit the current step's fields.
async fn submit_intake_step(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Map<String, Value>>,
) -> AppResult<ApiResponse<IntakeOutcome>> {
    let outcome = state.member_intake_service.submit_step(&id, patch).await?;
    Ok(ApiResponse::ok(outcome))
}

async fn intake_back(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<IntakeView>> {
    Ok(ApiResponse::ok(state.member_intake_service.back(&id).await?))
}

async fn discard_intake(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Deleted>> {
    info!(user_id = %user.id, intake_id = %id, "Intake discarded");

    state.member_intake_service.discard(&id).await?;
    Ok(ApiResponse::ok(Deleted::new(id)))
}
