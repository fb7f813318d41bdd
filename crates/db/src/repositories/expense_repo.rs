//! Repository for the `expenses` table.
//!
//! Mirrors the investment repository's transactional pattern: the row
//! mutation and the re-sum of `projects.total_expenses` commit together.

use sitebook_core::types::DbId;
use sqlx::PgPool;

use crate::models::expense::{
    Expense, ExpenseWithCategory, ExpenseWithProject, NewExpense, UpdateExpense,
};
use crate::repositories::aggregates;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, category_id, subcategory_id, amount, description, \
     vendor_name, invoice_number, expense_date, payment_method, receipt_path, \
     created_at, updated_at";

/// Joined select used by the listing queries.
const JOINED_SELECT: &str = "SELECT e.id, e.project_id, e.category_id, e.subcategory_id, \
     e.amount, e.description, e.vendor_name, e.invoice_number, e.expense_date, \
     e.payment_method, e.receipt_path, e.created_at, e.updated_at, \
     p.name AS project_name, c.name AS category_name, s.name AS subcategory_name \
     FROM expenses e \
     JOIN projects p ON p.id = e.project_id \
     JOIN categories c ON c.id = e.category_id \
     JOIN subcategories s ON s.id = e.subcategory_id";

/// Provides CRUD operations for expenses with transactional aggregate
/// maintenance.
pub struct ExpenseRepo;

impl ExpenseRepo {
    /// Insert a new expense and re-sum the parent project's expense total,
    /// in one transaction.
    pub async fn create(pool: &PgPool, input: &NewExpense) -> Result<Expense, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO expenses
                (project_id, category_id, subcategory_id, amount, description,
                 vendor_name, invoice_number, expense_date, payment_method, receipt_path)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        let expense = sqlx::query_as::<_, Expense>(&query)
            .bind(input.project_id)
            .bind(input.category_id)
            .bind(input.subcategory_id)
            .bind(input.amount)
            .bind(&input.description)
            .bind(&input.vendor_name)
            .bind(&input.invoice_number)
            .bind(input.expense_date)
            .bind(&input.payment_method)
            .bind(&input.receipt_path)
            .fetch_one(&mut *tx)
            .await?;

        aggregates::resync_project_expenses(&mut tx, input.project_id).await?;

        tx.commit().await?;
        Ok(expense)
    }

    /// Find an expense by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM expenses WHERE id = $1");
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all expenses with project and category names.
    pub async fn list(pool: &PgPool) -> Result<Vec<ExpenseWithProject>, sqlx::Error> {
        let query = format!("{JOINED_SELECT} ORDER BY e.expense_date DESC, e.id DESC");
        sqlx::query_as::<_, ExpenseWithProject>(&query)
            .fetch_all(pool)
            .await
    }

    /// List a project's expenses with category and subcategory names.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ExpenseWithCategory>, sqlx::Error> {
        sqlx::query_as::<_, ExpenseWithCategory>(
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
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// List a category's expenses with project and subcategory names.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<ExpenseWithProject>, sqlx::Error> {
        let query = format!(
            "{JOINED_SELECT} WHERE e.category_id = $1 ORDER BY e.expense_date ASC, e.id ASC"
        );
        sqlx::query_as::<_, ExpenseWithProject>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Update an expense. Only non-`None` fields in `input` are applied.
    ///
    /// When `project_id` changes, both the old and new project's expense
    /// totals are re-summed. Returns `None` if no row with the given `id`
    /// exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateExpense,
    ) -> Result<Option<Expense>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let old: Option<(DbId,)> =
            sqlx::query_as("SELECT project_id FROM expenses WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((old_project_id,)) = old else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE expenses SET
                project_id = COALESCE($2, project_id),
                category_id = COALESCE($3, category_id),
                subcategory_id = COALESCE($4, subcategory_id),
                amount = COALESCE($5, amount),
                description = COALESCE($6, description),
                vendor_name = COALESCE($7, vendor_name),
                invoice_number = COALESCE($8, invoice_number),
                expense_date = COALESCE($9, expense_date),
                payment_method = COALESCE($10, payment_method),
                receipt_path = COALESCE($11, receipt_path),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let expense = sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(input.category_id)
            .bind(input.subcategory_id)
            .bind(input.amount)
            .bind(&input.description)
            .bind(&input.vendor_name)
            .bind(&input.invoice_number)
            .bind(input.expense_date)
            .bind(&input.payment_method)
            .bind(&input.receipt_path)
            .fetch_one(&mut *tx)
            .await?;

        for project_id in aggregates::affected_ids(old_project_id, expense.project_id) {
            aggregates::resync_project_expenses(&mut tx, project_id).await?;
        }

        tx.commit().await?;
        Ok(Some(expense))
    }

    /// Delete an expense and re-sum its project's expense total.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let parent: Option<(DbId,)> =
            sqlx::query_as("DELETE FROM expenses WHERE id = $1 RETURNING project_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((project_id,)) = parent else {
            return Ok(false);
        };

        aggregates::resync_project_expenses(&mut tx, project_id).await?;

        tx.commit().await?;
        Ok(true)
    }
}
