//! Repository for the `projects` table.

use sitebook_core::listing::SortDirection;
use sitebook_core::types::DbId;
use sqlx::PgPool;

use crate::models::expense::ExpenseWithCategory;
use crate::models::investment::InvestmentWithInvestor;
use crate::models::project::{
    NewProject, Project, ProjectDetail, ProjectPage, ProjectStatistics, UpdateProject,
};
use crate::models::sale::ProjectSale;
use crate::repositories::aggregates;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, location, total_investment, total_expenses, \
     sale_price, credit_amount, is_completed, is_sold, start_date, end_date, sale_date, \
     created_at, updated_at";

/// Provides CRUD, listing, and aggregation queries for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, description, location, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Search, sort, and paginate projects.
    ///
    /// `search` matches name, location, or description case-insensitively
    /// (OR-combined substring match). `sort_column` must come from the
    /// allow-list in `sitebook_core::listing`; it is interpolated, not bound.
    pub async fn search(
        pool: &PgPool,
        search: Option<&str>,
        sort_column: &str,
        direction: SortDirection,
        per_page: i64,
        offset: i64,
    ) -> Result<ProjectPage, sqlx::Error> {
        let pattern = format!("%{}%", search.unwrap_or(""));
        let filter = "(name ILIKE $1 OR location ILIKE $1 OR COALESCE(description, '') ILIKE $1)";

        let (total,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM projects WHERE {filter}"))
                .bind(&pattern)
                .fetch_one(pool)
                .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE {filter}
             ORDER BY {sort_column} {dir}, id {dir}
             LIMIT $2 OFFSET $3",
            dir = direction.as_sql(),
        );
        let rows = sqlx::query_as::<_, Project>(&query)
            .bind(&pattern)
            .bind(per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(ProjectPage { rows, total })
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                is_completed = COALESCE($7, is_completed),
                is_sold = COALESCE($8, is_sold),
                sale_date = COALESCE($9, sale_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.is_completed)
            .bind(input.is_sold)
            .bind(input.sale_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project. Child investments, expenses, and the sale record
    /// cascade; the affected investors' totals are re-summed in the same
    /// transaction so the cascade is immediately reflected.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let investor_ids: Vec<(DbId,)> =
            sqlx::query_as("SELECT DISTINCT investor_id FROM investments WHERE project_id = $1")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for (investor_id,) in investor_ids {
            aggregates::resync_investor_investment(&mut tx, investor_id).await?;
        }

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch a project with its investments (investor names attached),
    /// expenses (category names attached), and sale record.
    pub async fn detail(pool: &PgPool, id: DbId) -> Result<Option<ProjectDetail>, sqlx::Error> {
        let Some(project) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let investments = sqlx::query_as::<_, InvestmentWithInvestor>(
            "SELECT i.id, i.project_id, i.investor_id, i.amount, i.investment_date,
                    i.description, i.payment_method, i.reference_number,
                    i.created_at, i.updated_at,
                    inv.name AS investor_name
             FROM investments i
             JOIN investors inv ON inv.id = i.investor_id
             WHERE i.project_id = $1
             ORDER BY i.investment_date ASC, i.id ASC",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let expenses = sqlx::query_as::<_, ExpenseWithCategory>(
            "SELECT e.id, e.project_id, e.category_id, e.subcategory_id, e.amount,
                    e.description, e.vendor_name, e.invoice_number, e.expense_date,
                    e.payment_method, e.receipt_path, e.created_at, e.updated_at,
                    c.name AS category_name,
                    s.name AS subcategory_name
             FROM expenses e
             JOIN categories c ON c.id = e.category_id
             JOIN subcategories s ON s.id = e.subcategory_id
             WHERE e.project_id = $1
             ORDER BY e.expense_date ASC, e.id ASC",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let sale = sqlx::query_as::<_, ProjectSale>(
            "SELECT id, project_id, buyer_name, buyer_email, buyer_phone, buyer_address,
                    total_sale_price, cash_amount, credit_amount, sale_date, notes,
                    created_at, updated_at
             FROM project_sales WHERE project_id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(Some(ProjectDetail {
            project,
            investments,
            expenses,
            sale,
        }))
    }

    /// Portfolio-wide statistics: project counts by state plus investment
    /// and expense sums across all projects.
    pub async fn statistics(pool: &PgPool) -> Result<ProjectStatistics, sqlx::Error> {
        sqlx::query_as::<_, ProjectStatistics>(
            "SELECT COUNT(*) AS total_projects,
                    COUNT(*) FILTER (WHERE is_completed) AS completed_projects,
                    COUNT(*) FILTER (WHERE is_sold) AS sold_projects,
                    COUNT(*) FILTER (WHERE NOT is_completed) AS active_projects,
                    COALESCE(SUM(total_investment), 0) AS total_investment,
                    COALESCE(SUM(total_expenses), 0) AS total_expenses
             FROM projects",
        )
        .fetch_one(pool)
        .await
    }
}
