//! Investment entity model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sitebook_core::types::{CalendarDate, DbId, Timestamp};
use sqlx::FromRow;

/// An investment row from the `investments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Investment {
    pub id: DbId,
    pub project_id: DbId,
    pub investor_id: DbId,
    pub amount: Decimal,
    pub investment_date: CalendarDate,
    pub description: Option<String>,
    pub payment_method: Option<String>,
    pub reference_number: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An investment joined with its project and investor names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvestmentWithParties {
    pub id: DbId,
    pub project_id: DbId,
    pub investor_id: DbId,
    pub amount: Decimal,
    pub investment_date: CalendarDate,
    pub description: Option<String>,
    pub payment_method: Option<String>,
    pub reference_number: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub project_name: String,
    pub investor_name: String,
}

/// An investment joined with its investor's name only (project-scoped reads).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvestmentWithInvestor {
    pub id: DbId,
    pub project_id: DbId,
    pub investor_id: DbId,
    pub amount: Decimal,
    pub investment_date: CalendarDate,
    pub description: Option<String>,
    pub payment_method: Option<String>,
    pub reference_number: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub investor_name: String,
}

/// Wire DTO for creating an investment. Validated into [`NewInvestment`].
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvestment {
    pub project_id: Option<DbId>,
    pub investor_id: Option<DbId>,
    pub amount: Option<Decimal>,
    pub investment_date: Option<CalendarDate>,
    pub description: Option<String>,
    pub payment_method: Option<String>,
    pub reference_number: Option<String>,
}

/// A validated investment insert.
#[derive(Debug, Clone)]
pub struct NewInvestment {
    pub project_id: DbId,
    pub investor_id: DbId,
    pub amount: Decimal,
    pub investment_date: CalendarDate,
    pub description: Option<String>,
    pub payment_method: Option<String>,
    pub reference_number: Option<String>,
}

/// DTO for updating an investment. Only present fields are applied;
/// `project_id`/`investor_id` changes re-parent the row and re-sum the
/// aggregates of both old and new parents.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvestment {
    pub project_id: Option<DbId>,
    pub investor_id: Option<DbId>,
    pub amount: Option<Decimal>,
    pub investment_date: Option<CalendarDate>,
    pub description: Option<String>,
    pub payment_method: Option<String>,
    pub reference_number: Option<String>,
}
