//! HTTP-level integration tests for project CRUD, listing and statistics.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, dec_field, delete, get, post_json, put_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_project_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/projects",
        serde_json::json!({
            "name": "Riverside Plaza",
            "location": "Karachi",
            "start_date": "2025-01-15",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Project created successfully");
    assert_eq!(json["data"]["name"], "Riverside Plaza");
    assert_eq!(json["data"]["is_completed"], false);
    assert_eq!(dec_field(&json["data"]["total_investment"]).to_string(), "0.00");
    assert!(json["data"]["id"].is_number());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_project_missing_fields_returns_422(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/projects", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["errors"]["name"][0], "The name field is required");
    assert_eq!(json["errors"]["location"][0], "The location field is required");
    assert_eq!(
        json["errors"]["start_date"][0],
        "The start_date field is required"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_end_date_must_follow_start_date(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/projects",
        serde_json::json!({
            "name": "Backwards",
            "location": "Multan",
            "start_date": "2025-06-01",
            "end_date": "2025-05-01",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert!(json["errors"]["end_date"][0]
        .as_str()
        .unwrap()
        .contains("after the start date"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_nonexistent_project_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/projects/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_project_partial_fields(pool: PgPool) {
    let id = common::seed_project(pool.clone(), "Original").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/projects/{id}"),
        serde_json::json!({ "name": "Renamed", "is_completed": true }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Renamed");
    assert_eq!(json["data"]["is_completed"], true);
    // Untouched fields keep their values.
    assert_eq!(json["data"]["location"], "Lahore");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_project_returns_message_envelope(pool: PgPool) {
    let id = common::seed_project(pool.clone(), "Doomed").await;

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Project deleted successfully");

    let response = get(common::build_test_app(pool), &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Listing: search, sort, pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_searches_name_and_location(pool: PgPool) {
    common::seed_project(pool.clone(), "Harbour View").await;
    common::seed_project(pool.clone(), "Hilltop Homes").await;

    let response = get(
        common::build_test_app(pool),
        "/api/v1/projects?search=harbour",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["name"], "Harbour View");
    assert_eq!(json["meta"]["total"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_clamps_per_page_and_builds_links(pool: PgPool) {
    for i in 0..3 {
        common::seed_project(pool.clone(), &format!("Block {i}")).await;
    }

    let response = get(
        common::build_test_app(pool),
        "/api/v1/projects?per_page=500&page=0",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["meta"]["per_page"], 100);
    assert_eq!(json["meta"]["current_page"], 1);
    assert_eq!(json["meta"]["total"], 3);
    assert!(json["links"]["first"]
        .as_str()
        .unwrap()
        .contains("per_page=100"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_unknown_sort_column_falls_back(pool: PgPool) {
    common::seed_project(pool.clone(), "Solo").await;

    // Unknown columns fall back to start_date, unknown directions to desc;
    // either way this must not be a 500.
    let response = get(
        common::build_test_app(pool),
        "/api/v1/projects?sort_by=drop_table&sort_direction=sideways",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_paginates(pool: PgPool) {
    for i in 0..5 {
        common::seed_project(pool.clone(), &format!("Phase {i}")).await;
    }

    let response = get(
        common::build_test_app(pool),
        "/api/v1/projects?per_page=2&page=2",
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["meta"]["last_page"], 3);
    assert!(json["links"]["prev"].as_str().unwrap().contains("page=1"));
    assert!(json["links"]["next"].as_str().unwrap().contains("page=3"));
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_statistics_counts_and_sums(pool: PgPool) {
    let active = common::seed_project(pool.clone(), "Active").await;
    let done = common::seed_project(pool.clone(), "Done").await;
    put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{done}"),
        serde_json::json!({ "is_completed": true }),
    )
    .await;

    let investor = common::seed_investor(pool.clone(), "Asif", "asif@example.com").await;
    common::seed_investment(pool.clone(), active, investor, 700).await;

    let response = get(common::build_test_app(pool), "/api/v1/projects/statistics").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total_projects"], 2);
    assert_eq!(json["data"]["completed_projects"], 1);
    assert_eq!(json["data"]["active_projects"], 1);
    assert_eq!(dec_field(&json["data"]["total_investment"]).to_string(), "700.00");
}
