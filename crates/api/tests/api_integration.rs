//! API integration tests.
//!
//! These drive the full router against a mock database.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone)]

use std::sync::Arc;

use axum::{
    Extension, Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    middleware,
};
use chrono::Utc;
use parish_api::{AppState, auth_middleware, router as api_router};
use parish_db::entities::{admin_user, announcement};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use serde_json::{Value, json};
use tower::ServiceExt;

fn account(role: admin_user::Role) -> admin_user::Model {
    admin_user::Model {
        id: "acc1".to_string(),
        email: "office@stmary.org".to_string(),
        email_lower: "office@stmary.org".to_string(),
        display_name: "Parish Office".to_string(),
        role,
        phone: None,
        department: None,
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        token: Some("tok123".to_string()),
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn announcement(id: &str, title: &str, body: &str) -> announcement::Model {
    announcement::Model {
        id: id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        image_url: None,
        author: "Parish Office".to_string(),
        status: announcement::AnnouncementStatus::Active,
        target_type: announcement::TargetType::All,
        target_categories: json!(["clergy"]),
        target_user_ids: json!([]),
        views: 0,
        is_read: false,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

/// Router without any session attached.
fn anonymous_router(db: DatabaseConnection) -> Router {
    api_router().with_state(AppState::new(Arc::new(db)))
}

/// Router where every request carries `account`, as the auth middleware would attach it.
fn signed_in_router(db: DatabaseConnection, account: admin_user::Model) -> Router {
    api_router()
        .layer(Extension(account))
        .with_state(AppState::new(Arc::new(db)))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_collection_requires_session() {
    let response = anonymous_router(empty_db())
        .oneshot(
            Request::builder()
                .uri("/announcements")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_unknown_endpoint_returns_404() {
    let response = anonymous_router(empty_db())
        .oneshot(
            Request::builder()
                .uri("/nonexistent/endpoint")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_signin_with_invalid_json_returns_400() {
    let response = anonymous_router(empty_db())
        .oneshot(
            Request::builder()
                .uri("/signin")
                .method("POST")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("invalid json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_signin_with_unknown_email_returns_401() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<admin_user::Model>::new()])
        .into_connection();

    let response = anonymous_router(db)
        .oneshot(
            Request::builder()
                .uri("/signin")
                .method("POST")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"email":"nobody@stmary.org","password":"whatever1"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_token_resolves_session() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![account(admin_user::Role::Staff)]])
        .into_connection();
    let state = AppState::new(Arc::new(db));
    let app = api_router()
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/i")
                .header(header::AUTHORIZATION, "Bearer tok123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["email"], "office@stmary.org");
    assert_eq!(body["data"]["role"], "staff");
    assert!(body["data"].get("passwordHash").is_none());
    assert!(body["data"].get("token").is_none());
}

#[tokio::test]
async fn test_create_with_blank_title_is_rejected() {
    // No query results queued: reaching the database would fail the test with a 500.
    let response = signed_in_router(empty_db(), account(admin_user::Role::Staff))
        .oneshot(
            Request::builder()
                .uri("/announcements")
                .method("POST")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"title":"   ","body":"Vespers at six"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_with_missing_field_is_rejected() {
    let response = signed_in_router(empty_db(), account(admin_user::Role::Staff))
        .oneshot(
            Request::builder()
                .uri("/bookings")
                .method("POST")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"memberName":"Dawit","serviceType":"Baptism"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("missing field `date`")
    );
}

#[tokio::test]
async fn test_list_filters_by_query() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            announcement("a1", "Feast of St. Mary", "Liturgy at nine"),
            announcement("a2", "Parking notice", "Use the north lot"),
            announcement("a3", "Choir practice", "Bring your MARY hymnal"),
        ]])
        .into_connection();

    let response = signed_in_router(db, account(admin_user::Role::Staff))
        .oneshot(
            Request::builder()
                .uri("/announcements?q=mary")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a1", "a3"]);
}

#[tokio::test]
async fn test_summary_tiles_are_tagged() {
    let mut read = announcement("a2", "Lent schedule", "Fasting days");
    read.is_read = true;
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![announcement("a1", "Feast", "Liturgy"), read]])
        .into_connection();

    let response = signed_in_router(db, account(admin_user::Role::Staff))
        .oneshot(
            Request::builder()
                .uri("/announcements/summary")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let tiles = body["data"].as_array().unwrap();
    let total = tiles.iter().find(|t| t["key"] == "total").unwrap();
    assert_eq!(total["kind"], "count");
    assert_eq!(total["value"], 2);
    let reads = tiles.iter().find(|t| t["key"] == "reads").unwrap();
    assert_eq!(reads["value"], 1);
}

#[tokio::test]
async fn test_admin_routes_reject_staff() {
    let response = signed_in_router(empty_db(), account(admin_user::Role::Staff))
        .oneshot(Request::builder().uri("/admins").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_routes_list_accounts_for_admin() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            account(admin_user::Role::Admin),
            account(admin_user::Role::Staff),
        ]])
        .into_connection();

    let response = signed_in_router(db, account(admin_user::Role::Admin))
        .oneshot(Request::builder().uri("/admins").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_message_list_rejects_unknown_status() {
    let response = signed_in_router(empty_db(), account(admin_user::Role::Staff))
        .oneshot(
            Request::builder()
                .uri("/messages?status=archived")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_intake_start_then_back_stays_on_first_step() {
    let app = signed_in_router(empty_db(), account(admin_user::Role::Staff));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/members/intake")
                .method("POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let started = body_json(response).await;
    let id = started["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(started["data"]["step"], 1);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/members/intake/{id}/back"))
                .method("POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["step"], 1);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/members/intake/{id}"))
                .method("DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/members/intake/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
