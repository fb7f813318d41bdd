//! Expense entity model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sitebook_core::types::{CalendarDate, DbId, Timestamp};
use sqlx::FromRow;

/// An expense row from the `expenses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Expense {
    pub id: DbId,
    pub project_id: DbId,
    pub category_id: DbId,
    pub subcategory_id: DbId,
    pub amount: Decimal,
    pub description: String,
    pub vendor_name: Option<String>,
    pub invoice_number: Option<String>,
    pub expense_date: CalendarDate,
    pub payment_method: Option<String>,
    pub receipt_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An expense joined with its category and subcategory names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExpenseWithCategory {
    pub id: DbId,
    pub project_id: DbId,
    pub category_id: DbId,
    pub subcategory_id: DbId,
    pub amount: Decimal,
    pub description: String,
    pub vendor_name: Option<String>,
    pub invoice_number: Option<String>,
    pub expense_date: CalendarDate,
    pub payment_method: Option<String>,
    pub receipt_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub category_name: String,
    pub subcategory_name: String,
}

/// An expense joined with its project and category names (category-scoped
/// and global listings).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExpenseWithProject {
    pub id: DbId,
    pub project_id: DbId,
    pub category_id: DbId,
    pub subcategory_id: DbId,
    pub amount: Decimal,
    pub description: String,
    pub vendor_name: Option<String>,
    pub invoice_number: Option<String>,
    pub expense_date: CalendarDate,
    pub payment_method: Option<String>,
    pub receipt_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub project_name: String,
    pub category_name: String,
    pub subcategory_name: String,
}

/// Wire DTO for creating an expense. Validated into [`NewExpense`].
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExpense {
    pub project_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub subcategory_id: Option<DbId>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub vendor_name: Option<String>,
    pub invoice_number: Option<String>,
    pub expense_date: Option<CalendarDate>,
    pub payment_method: Option<String>,
    pub receipt_path: Option<String>,
}

/// A validated expense insert.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub project_id: DbId,
    pub category_id: DbId,
    pub subcategory_id: DbId,
    pub amount: Decimal,
    pub description: String,
    pub vendor_name: Option<String>,
    pub invoice_number: Option<String>,
    pub expense_date: CalendarDate,
    pub payment_method: Option<String>,
    pub receipt_path: Option<String>,
}

/// DTO for updating an expense. Only present fields are applied; a
/// `project_id` change re-parents the row and re-sums both projects'
/// expense totals.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateExpense {
    pub project_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub subcategory_id: Option<DbId>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub vendor_name: Option<String>,
    pub invoice_number: Option<String>,
    pub expense_date: Option<CalendarDate>,
    pub payment_method: Option<String>,
    pub receipt_path: Option<String>,
}
