//! Account management endpoints (administrators only).

use axum::{Router, extract::State, routing::get};
use parish_common::AppResult;
use parish_core::CreateAccountInput;
use parish_db::entities::admin_user;
use tracing::info;

use crate::{
    extractors::{AdminUser, Json},
    middleware::AppState,
    response::ApiResponse,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_accounts).post(create_account))
}

/// List every dashboard account.
async fn list_accounts(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<admin_user::Model>>> {
    let accounts = state.account_service.list().await?;
    Ok(ApiResponse::ok(accounts))
}

/// Create an account with a role.
async fn create_account(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<CreateAccountInput>,
) -> AppResult<ApiResponse<admin_user::Model>> {
    let account = state.account_service.create_account(req).await?;

    info!(user_id = %admin.id, account_id = %account.id, role = ?account.role, "Account created");
    Ok(ApiResponse::ok(account))
}
