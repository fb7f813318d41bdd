//! Error envelope and middleware behavior tests.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_health_endpoint(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_route_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/nonexistent").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_not_found_envelope_shape(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/investments/123456").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "Investment with id 123456 not found");
    assert!(json.get("errors").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_validation_envelope_shape(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/categories",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "The given data was invalid");
    assert!(json["errors"].is_object());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_requests_carry_request_id(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}
