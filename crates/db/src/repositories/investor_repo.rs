//! Repository for the `investors` table.

use rust_decimal::Decimal;
use sitebook_core::types::DbId;
use sqlx::PgPool;

use crate::models::investment::Investment;
use crate::models::investor::{Investor, NewInvestor, ProjectInvestmentGroup, UpdateInvestor};
use crate::models::project::Project;
use crate::repositories::aggregates;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, email, phone, address, total_investment, is_active, created_at, updated_at";

/// Provides CRUD operations for investors.
pub struct InvestorRepo;

impl InvestorRepo {
    /// Insert a new investor, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewInvestor) -> Result<Investor, sqlx::Error> {
        let query = format!(
            "INSERT INTO investors (name, email, phone, address)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Investor>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .fetch_one(pool)
            .await
    }

    /// Find an investor by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Investor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM investors WHERE id = $1");
        sqlx::query_as::<_, Investor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an investor by email, optionally excluding one id (used for the
    /// uniqueness pre-check on update).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
        exclude_id: Option<DbId>,
    ) -> Result<Option<Investor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM investors WHERE email = $1 AND ($2::BIGINT IS NULL OR id <> $2)"
        );
        sqlx::query_as::<_, Investor>(&query)
            .bind(email)
            .bind(exclude_id)
            .fetch_optional(pool)
            .await
    }

    /// List all investors, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Investor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM investors ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Investor>(&query).fetch_all(pool).await
    }

    /// Update an investor. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInvestor,
    ) -> Result<Option<Investor>, sqlx::Error> {
        let query = format!(
            "UPDATE investors SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Investor>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete an investor. Their investments cascade; every project they
    /// had invested in gets its total re-summed in the same transaction.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let project_ids: Vec<(DbId,)> =
            sqlx::query_as("SELECT DISTINCT project_id FROM investments WHERE investor_id = $1")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        let result = sqlx::query("DELETE FROM investors WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for (project_id,) in project_ids {
            aggregates::resync_project_investment(&mut tx, project_id).await?;
        }

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Group an investor's investments by project, each group carrying the
    /// per-project subtotal. Groups are ordered by first investment date.
    pub async fn investments_by_project(
        pool: &PgPool,
        investor_id: DbId,
    ) -> Result<Vec<ProjectInvestmentGroup>, sqlx::Error> {
        let investments = sqlx::query_as::<_, Investment>(
            "SELECT id, project_id, investor_id, amount, investment_date, description,
                    payment_method, reference_number, created_at, updated_at
             FROM investments
             WHERE investor_id = $1
             ORDER BY investment_date ASC, id ASC",
        )
        .bind(investor_id)
        .fetch_all(pool)
        .await?;

        let projects = sqlx::query_as::<_, Project>(
            "SELECT id, name, description, location, total_investment, total_expenses,
                    sale_price, credit_amount, is_completed, is_sold, start_date, end_date,
                    sale_date, created_at, updated_at
             FROM projects
             WHERE id IN (SELECT DISTINCT project_id FROM investments WHERE investor_id = $1)",
        )
        .bind(investor_id)
        .fetch_all(pool)
        .await?;

        // Group in first-seen order, preserving investment date ordering.
        let mut groups: Vec<ProjectInvestmentGroup> = Vec::new();
        for investment in investments {
            match groups
                .iter_mut()
                .find(|g| g.project.id == investment.project_id)
            {
                Some(group) => {
                    group.total_investment += investment.amount;
                    group.investments.push(investment);
                }
                None => {
                    let Some(project) = projects
                        .iter()
                        .find(|p| p.id == investment.project_id)
                        .cloned()
                    else {
                        continue;
                    };
                    groups.push(ProjectInvestmentGroup {
                        project,
                        total_investment: investment.amount,
                        investments: vec![investment],
                    });
                }
            }
        }
        Ok(groups)
    }

    /// Sum of the investor's investment amounts, computed from the rows.
    ///
    /// Matches the stored `total_investment` whenever the aggregate
    /// maintenance invariant holds; the detail endpoint reports this live
    /// value.
    pub async fn total_invested(pool: &PgPool, investor_id: DbId) -> Result<Decimal, sqlx::Error> {
        let (total,): (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(amount), 0) FROM investments WHERE investor_id = $1",
        )
        .bind(investor_id)
        .fetch_one(pool)
        .await?;
        Ok(total)
    }
}
