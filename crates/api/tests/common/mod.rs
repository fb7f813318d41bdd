#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use sitebook_api::config::ServerConfig;
use sitebook_api::router::build_app_router;
use sitebook_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
///
/// Delegates to [`build_app_router`] so integration tests exercise the
/// same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Parse a JSON field holding a serialized decimal (amounts arrive as
/// strings like `"600.00"`).
pub fn dec_field(value: &serde_json::Value) -> rust_decimal::Decimal {
    value.as_str().unwrap().parse().unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers (drive the API itself, so tests read like client sessions)
// ---------------------------------------------------------------------------

/// Create a project and return its id.
pub async fn seed_project(pool: PgPool, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/projects",
        serde_json::json!({
            "name": name,
            "location": "Lahore",
            "start_date": "2025-01-01",
        }),
    )
    .await;
    let json = body_json(response).await;
    json["data"]["id"].as_i64().unwrap()
}

/// Create an investor and return their id.
pub async fn seed_investor(pool: PgPool, name: &str, email: &str) -> i64 {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/investors",
        serde_json::json!({ "name": name, "email": email }),
    )
    .await;
    let json = body_json(response).await;
    json["data"]["id"].as_i64().unwrap()
}

/// Create a category with one subcategory; returns `(category_id, subcategory_id)`.
pub async fn seed_category(pool: PgPool, name: &str) -> (i64, i64) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/categories",
        serde_json::json!({ "name": name }),
    )
    .await;
    let category = body_json(response).await;
    let category_id = category["data"]["id"].as_i64().unwrap();

    let response = post_json(
        build_test_app(pool),
        &format!("/api/v1/categories/{category_id}/subcategories"),
        serde_json::json!({ "name": format!("{name} sub") }),
    )
    .await;
    let subcategory = body_json(response).await;
    let subcategory_id = subcategory["data"]["id"].as_i64().unwrap();

    (category_id, subcategory_id)
}

/// Record an investment and return its id.
pub async fn seed_investment(pool: PgPool, project_id: i64, investor_id: i64, amount: i64) -> i64 {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/investments",
        serde_json::json!({
            "project_id": project_id,
            "investor_id": investor_id,
            "amount": amount,
            "investment_date": "2025-02-01",
        }),
    )
    .await;
    let json = body_json(response).await;
    json["data"]["id"].as_i64().unwrap()
}

/// Record an expense and return its id.
pub async fn seed_expense(
    pool: PgPool,
    project_id: i64,
    category_id: i64,
    subcategory_id: i64,
    amount: i64,
) -> i64 {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/expenses",
        serde_json::json!({
            "project_id": project_id,
            "category_id": category_id,
            "subcategory_id": subcategory_id,
            "amount": amount,
            "description": "Materials",
            "expense_date": "2025-03-01",
        }),
    )
    .await;
    let json = body_json(response).await;
    json["data"]["id"].as_i64().unwrap()
}
