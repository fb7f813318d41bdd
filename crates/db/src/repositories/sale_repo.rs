//! Repository for the `project_sales` table.
//!
//! A project has at most one sale record (`uq_project_sales_project_id`);
//! the write path is an upsert keyed on the project.

use sitebook_core::types::DbId;
use sqlx::PgPool;

use crate::models::sale::{NewProjectSale, ProjectSale};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, buyer_name, buyer_email, buyer_phone, buyer_address, \
     total_sale_price, cash_amount, credit_amount, sale_date, notes, created_at, updated_at";

/// Provides the sale record operations for a project.
pub struct ProjectSaleRepo;

impl ProjectSaleRepo {
    /// Insert or replace the sale record for a project.
    pub async fn upsert_for_project(
        pool: &PgPool,
        project_id: DbId,
        input: &NewProjectSale,
    ) -> Result<ProjectSale, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_sales
                (project_id, buyer_name, buyer_email, buyer_phone, buyer_address,
                 total_sale_price, cash_amount, credit_amount, sale_date, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT ON CONSTRAINT uq_project_sales_project_id DO UPDATE SET
                buyer_name = EXCLUDED.buyer_name,
                buyer_email = EXCLUDED.buyer_email,
                buyer_phone = EXCLUDED.buyer_phone,
                buyer_address = EXCLUDED.buyer_address,
                total_sale_price = EXCLUDED.total_sale_price,
                cash_amount = EXCLUDED.cash_amount,
                credit_amount = EXCLUDED.credit_amount,
                sale_date = EXCLUDED.sale_date,
                notes = EXCLUDED.notes,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectSale>(&query)
            .bind(project_id)
            .bind(&input.buyer_name)
            .bind(&input.buyer_email)
            .bind(&input.buyer_phone)
            .bind(&input.buyer_address)
            .bind(input.total_sale_price)
            .bind(input.cash_amount)
            .bind(input.credit_amount)
            .bind(input.sale_date)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a project's sale record, if any.
    pub async fn find_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<ProjectSale>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_sales WHERE project_id = $1");
        sqlx::query_as::<_, ProjectSale>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Remove a project's sale record. Returns `true` if a row was removed.
    pub async fn delete_for_project(pool: &PgPool, project_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_sales WHERE project_id = $1")
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
