//! Request extractors.

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};
use parish_common::AppError;
use parish_db::entities::admin_user;

/// Signed-in account extractor.
#[derive(Debug, Clone)]
pub struct AuthUser(pub admin_user::Model);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by auth middleware
        parts
            .extensions
            .get::<admin_user::Model>()
            .cloned()
            .map(AuthUser)
            .ok_or(AppError::Unauthorized)
    }
}

/// Signed-in administrator extractor.
///
/// Rejects with 401 when there is no session and 403 for non-admin roles.
#[derive(Debug, Clone)]
pub struct AdminUser(pub admin_user::Model);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(account) = AuthUser::from_request_parts(parts, state).await?;

        if !account.is_admin() {
            return Err(AppError::Forbidden(
                "Administrator role required".to_string(),
            ));
        }
        Ok(Self(account))
    }
}

/// JSON body extractor.
///
/// Malformed bodies and missing or mistyped fields reject with
/// `AppError::Validation`, rendered in the usual error envelope.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

/// Query string extractor rejecting with `AppError::BadRequest`.
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);
