//! Own-account endpoints (`/i`).

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use parish_common::AppResult;
use parish_core::{ChangePasswordInput, PasswordChanged, UpdateProfileInput};
use parish_db::entities::admin_user;
use tracing::info;

use crate::{
    extractors::{AuthUser, Json},
    middleware::AppState,
    response::ApiResponse,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(me).patch(update_profile))
        .route("/password", post(change_password))
}

/// The signed-in account.
async fn me(AuthUser(user): AuthUser) -> AppResult<ApiResponse<admin_user::Model>> {
    Ok(ApiResponse::ok(user))
}

/// Update display name, phone or department.
async fn update_profile(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileInput>,
) -> AppResult<ApiResponse<admin_user::Model>> {
    info!(user_id = %user.id, "Updating profile");

    let updated = state.account_service.update_profile(user, req).await?;
    Ok(ApiResponse::ok(updated))
}

/// Change password. Returns the replacement session token.
async fn change_password(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ChangePasswordInput>,
) -> AppResult<ApiResponse<PasswordChanged>> {
    let user_id = user.id.clone();
    let changed = state.account_service.change_password(user, req).await?;

    info!(user_id = %user_id, "Password changed");
    Ok(ApiResponse::ok(changed))
}
