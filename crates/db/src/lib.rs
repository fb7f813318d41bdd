//! Persistence layer for the sitebook ledger.
//!
//! PostgreSQL via sqlx: entity models, repositories, and the embedded
//! schema migrations. Aggregate columns (`projects.total_investment`,
//! `projects.total_expenses`, `investors.total_investment`) are maintained
//! transactionally by the investment/expense repositories; see
//! [`repositories::aggregates`].

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending schema migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
