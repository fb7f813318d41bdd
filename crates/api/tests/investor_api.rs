//! HTTP-level integration tests for investors: CRUD, email uniqueness and
//! the grouped-holdings detail view.

mod common;

use axum::http::StatusCode;
use common::{body_json, dec_field, delete, get, post_json, put_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_investor_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/investors",
        serde_json::json!({
            "name": "Ghulam Abbas",
            "email": "ghulam@example.com",
            "phone": "+92-300-1234567",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "ghulam@example.com");
    assert_eq!(json["data"]["is_active"], true);
    assert_eq!(dec_field(&json["data"]["total_investment"]).to_string(), "0.00");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_email_returns_field_error(pool: PgPool) {
    common::seed_investor(pool.clone(), "First", "taken@example.com").await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/investors",
        serde_json::json!({ "name": "Second", "email": "taken@example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["email"][0], "The email has already been taken");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_malformed_email_returns_422(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/investors",
        serde_json::json!({ "name": "Typo", "email": "not-an-email" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert!(json["errors"]["email"][0]
        .as_str()
        .unwrap()
        .contains("valid email"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_keeps_own_email(pool: PgPool) {
    // Re-submitting an investor's current email must not trip the
    // uniqueness check.
    let id = common::seed_investor(pool.clone(), "Self", "self@example.com").await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/investors/{id}"),
        serde_json::json!({ "email": "self@example.com", "name": "Self Renamed" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Self Renamed");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_detail_groups_investments_by_project(pool: PgPool) {
    let investor = common::seed_investor(pool.clone(), "Habib", "habib@example.com").await;
    let p1 = common::seed_project(pool.clone(), "Tower A").await;
    let p2 = common::seed_project(pool.clone(), "Tower B").await;
    common::seed_investment(pool.clone(), p1, investor, 300).await;
    common::seed_investment(pool.clone(), p1, investor, 200).await;
    common::seed_investment(pool.clone(), p2, investor, 100).await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/investors/{investor}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(dec_field(&json["total_investment"]).to_string(), "600.00");
    let groups = json["investments_by_project"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["project"]["name"], "Tower A");
    assert_eq!(dec_field(&groups[0]["total_investment"]).to_string(), "500.00");
    assert_eq!(groups[0]["investments"].as_array().unwrap().len(), 2);
    assert_eq!(dec_field(&groups[1]["total_investment"]).to_string(), "100.00");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_investor_resyncs_project_totals(pool: PgPool) {
    let investor = common::seed_investor(pool.clone(), "Iqbal", "iqbal@example.com").await;
    let keeper = common::seed_investor(pool.clone(), "Junaid", "junaid@example.com").await;
    let project = common::seed_project(pool.clone(), "Shared").await;
    common::seed_investment(pool.clone(), project, investor, 800).await;
    common::seed_investment(pool.clone(), project, keeper, 150).await;

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/investors/{investor}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/projects/{project}"),
        )
        .await,
    )
    .await;
    assert_eq!(
        dec_field(&json["data"]["total_investment"]).to_string(),
        "150.00"
    );
    assert_eq!(json["data"]["investments"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_nonexistent_investor_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/investors/424242").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
