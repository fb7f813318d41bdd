//! Repository for the `categories` and `subcategories` tables.

use sitebook_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{
    Category, CategoryWithSubcategories, NewCategory, NewSubcategory, Subcategory, UpdateCategory,
};
use crate::repositories::aggregates;

/// Column list for category queries.
const CATEGORY_COLUMNS: &str =
    "id, name, description, color_code, is_active, created_at, updated_at";

/// Column list for subcategory queries.
const SUBCATEGORY_COLUMNS: &str =
    "id, category_id, name, description, created_at, updated_at";

/// Provides CRUD operations for expense categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, description, color_code)
             VALUES ($1, $2, $3)
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.color_code)
            .fetch_one(pool)
            .await
    }

    /// Find a category by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a subcategory by its internal ID.
    pub async fn find_subcategory_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Subcategory>, sqlx::Error> {
        let query = format!("SELECT {SUBCATEGORY_COLUMNS} FROM subcategories WHERE id = $1");
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all categories with their subcategories attached, in name order.
    pub async fn list_with_subcategories(
        pool: &PgPool,
    ) -> Result<Vec<CategoryWithSubcategories>, sqlx::Error> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name ASC"
        ))
        .fetch_all(pool)
        .await?;

        let subcategories = sqlx::query_as::<_, Subcategory>(&format!(
            "SELECT {SUBCATEGORY_COLUMNS} FROM subcategories ORDER BY name ASC"
        ))
        .fetch_all(pool)
        .await?;

        Ok(categories
            .into_iter()
            .map(|category| {
                let subcategories = subcategories
                    .iter()
                    .filter(|s| s.category_id == category.id)
                    .cloned()
                    .collect();
                CategoryWithSubcategories {
                    category,
                    subcategories,
                }
            })
            .collect())
    }

    /// Fetch one category with its subcategories.
    pub async fn detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CategoryWithSubcategories>, sqlx::Error> {
        let Some(category) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let subcategories = sqlx::query_as::<_, Subcategory>(&format!(
            "SELECT {SUBCATEGORY_COLUMNS} FROM subcategories WHERE category_id = $1 ORDER BY name ASC"
        ))
        .bind(id)
        .fetch_all(pool)
        .await?;
        Ok(Some(CategoryWithSubcategories {
            category,
            subcategories,
        }))
    }

    /// Update a category. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                color_code = COALESCE($4, color_code),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.color_code)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category. Its subcategories and expenses cascade; every
    /// project that had expenses in the category gets its expense total
    /// re-summed in the same transaction.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let project_ids: Vec<(DbId,)> =
            sqlx::query_as("SELECT DISTINCT project_id FROM expenses WHERE category_id = $1")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for (project_id,) in project_ids {
            aggregates::resync_project_expenses(&mut tx, project_id).await?;
        }

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a subcategory under a category, returning the created row.
    pub async fn create_subcategory(
        pool: &PgPool,
        category_id: DbId,
        input: &NewSubcategory,
    ) -> Result<Subcategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO subcategories (category_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {SUBCATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(category_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }
}
