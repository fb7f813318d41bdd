//! Expense category and subcategory models and DTOs.

use serde::{Deserialize, Serialize};
use sitebook_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A category row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub color_code: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A subcategory row from the `subcategories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subcategory {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A category with its subcategories eagerly attached.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithSubcategories {
    #[serde(flatten)]
    pub category: Category,
    pub subcategories: Vec<Subcategory>,
}

/// Wire DTO for creating a category. Validated into [`NewCategory`].
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color_code: Option<String>,
}

/// A validated category insert.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub color_code: Option<String>,
}

/// DTO for updating a category. Only present fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color_code: Option<String>,
    pub is_active: Option<bool>,
}

/// Wire DTO for creating a subcategory under a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubcategory {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A validated subcategory insert.
#[derive(Debug, Clone)]
pub struct NewSubcategory {
    pub name: String,
    pub description: Option<String>,
}
