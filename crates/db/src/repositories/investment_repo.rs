//! Repository for the `investments` table.
//!
//! Every mutation here is one atomic unit of work: the row change and the
//! re-sum of the affected project/investor aggregates commit together, or
//! not at all.

use sitebook_core::types::DbId;
use sqlx::PgPool;

use crate::models::investment::{
    Investment, InvestmentWithInvestor, InvestmentWithParties, NewInvestment, UpdateInvestment,
};
use crate::repositories::aggregates;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, investor_id, amount, investment_date, description, \
     payment_method, reference_number, created_at, updated_at";

/// Joined select used by the listing queries.
const JOINED_SELECT: &str = "SELECT i.id, i.project_id, i.investor_id, i.amount, \
     i.investment_date, i.description, i.payment_method, i.reference_number, \
     i.created_at, i.updated_at, \
     p.name AS project_name, inv.name AS investor_name \
     FROM investments i \
     JOIN projects p ON p.id = i.project_id \
     JOIN investors inv ON inv.id = i.investor_id";

/// Provides CRUD operations for investments with transactional aggregate
/// maintenance.
pub struct InvestmentRepo;

impl InvestmentRepo {
    /// Insert a new investment and re-sum the parent project's and
    /// investor's totals, all in one transaction.
    pub async fn create(pool: &PgPool, input: &NewInvestment) -> Result<Investment, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO investments
                (project_id, investor_id, amount, investment_date,
                 description, payment_method, reference_number)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let investment = sqlx::query_as::<_, Investment>(&query)
            .bind(input.project_id)
            .bind(input.investor_id)
            .bind(input.amount)
            .bind(input.investment_date)
            .bind(&input.description)
            .bind(&input.payment_method)
            .bind(&input.reference_number)
            .fetch_one(&mut *tx)
            .await?;

        aggregates::resync_project_investment(&mut tx, input.project_id).await?;
        aggregates::resync_investor_investment(&mut tx, input.investor_id).await?;

        tx.commit().await?;
        Ok(investment)
    }

    /// Find an investment by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Investment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM investments WHERE id = $1");
        sqlx::query_as::<_, Investment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all investments with project and investor names.
    pub async fn list(pool: &PgPool) -> Result<Vec<InvestmentWithParties>, sqlx::Error> {
        let query = format!("{JOINED_SELECT} ORDER BY i.investment_date DESC, i.id DESC");
        sqlx::query_as::<_, InvestmentWithParties>(&query)
            .fetch_all(pool)
            .await
    }

    /// List a project's investments with investor names.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<InvestmentWithInvestor>, sqlx::Error> {
        sqlx::query_as::<_, InvestmentWithInvestor>(
            "SELECT i.id, i.project_id, i.investor_id, i.amount, i.investment_date,
                    i.description, i.payment_method, i.reference_number,
                    i.created_at, i.updated_at,
                    inv.name AS investor_name
             FROM investments i
             JOIN investors inv ON inv.id = i.investor_id
             WHERE i.project_id = $1
             ORDER BY i.investment_date ASC, i.id ASC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// List an investor's investments with project names.
    pub async fn list_by_investor(
        pool: &PgPool,
        investor_id: DbId,
    ) -> Result<Vec<InvestmentWithParties>, sqlx::Error> {
        let query = format!(
            "{JOINED_SELECT} WHERE i.investor_id = $1 ORDER BY i.investment_date ASC, i.id ASC"
        );
        sqlx::query_as::<_, InvestmentWithParties>(&query)
            .bind(investor_id)
            .fetch_all(pool)
            .await
    }

    /// Update an investment. Only non-`None` fields in `input` are applied.
    ///
    /// When `project_id` or `investor_id` changes, the aggregates of both
    /// the old and new parent are re-summed (deduplicated union), so a
    /// re-parented row leaves no one stale. Returns `None` if no row with
    /// the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInvestment,
    ) -> Result<Option<Investment>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let old: Option<(DbId, DbId)> =
            sqlx::query_as("SELECT project_id, investor_id FROM investments WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((old_project_id, old_investor_id)) = old else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE investments SET
                project_id = COALESCE($2, project_id),
                investor_id = COALESCE($3, investor_id),
                amount = COALESCE($4, amount),
                investment_date = COALESCE($5, investment_date),
                description = COALESCE($6, description),
                payment_method = COALESCE($7, payment_method),
                reference_number = COALESCE($8, reference_number),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let investment = sqlx::query_as::<_, Investment>(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(input.investor_id)
            .bind(input.amount)
            .bind(input.investment_date)
            .bind(&input.description)
            .bind(&input.payment_method)
            .bind(&input.reference_number)
            .fetch_one(&mut *tx)
            .await?;

        for project_id in aggregates::affected_ids(old_project_id, investment.project_id) {
            aggregates::resync_project_investment(&mut tx, project_id).await?;
        }
        for investor_id in aggregates::affected_ids(old_investor_id, investment.investor_id) {
            aggregates::resync_investor_investment(&mut tx, investor_id).await?;
        }

        tx.commit().await?;
        Ok(Some(investment))
    }

    /// Delete an investment and re-sum its project's and investor's totals.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let parents: Option<(DbId, DbId)> =
            sqlx::query_as("DELETE FROM investments WHERE id = $1 RETURNING project_id, investor_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((project_id, investor_id)) = parents else {
            return Ok(false);
        };

        aggregates::resync_project_investment(&mut tx, project_id).await?;
        aggregates::resync_investor_investment(&mut tx, investor_id).await?;

        tx.commit().await?;
        Ok(true)
    }
}
