//! Overview endpoint.

use axum::{Router, extract::State, routing::get};
use parish_common::AppResult;
use parish_core::SummaryTile;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(overview))
}

async fn overview(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<SummaryTile>>> {
    let tiles = state.dashboard_service.overview().await?;
    Ok(ApiResponse::ok(tiles))
}
