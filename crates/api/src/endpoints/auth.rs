//! Authentication endpoints.

use axum::{Router, extract::State, routing::post};
use parish_common::AppResult;
use parish_core::{SignInInput, SignInResult};
use tracing::info;

use crate::{
    extractors::{AuthUser, Json},
    middleware::AppState,
    response::{Ack, ApiResponse},
};

/// Sign in with e-mail and password.
async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SignInInput>,
) -> AppResult<ApiResponse<SignInResult>> {
    let result = state.account_service.sign_in(req).await?;

    info!(user_id = %result.account.id, "Signed in");
    Ok(ApiResponse::ok(result))
}

/// Sign out (invalidate current token by rotating it).
async fn signout(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Ack>> {
    let user_id = user.id.clone();
    state.account_service.sign_out(user).await?;

    info!(user_id = %user_id, "Signed out");
    Ok(ApiResponse::ok(Ack::ok()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signin", post(signin))
        .route("/signout", post(signout))
}
