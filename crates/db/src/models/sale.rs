//! Project sale record model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sitebook_core::types::{CalendarDate, DbId, Timestamp};
use sqlx::FromRow;

/// A sale row from the `project_sales` table. At most one per project.
///
/// `cash_amount` is the portion of the price actually received in cash;
/// it is the only sale figure that enters the profit computation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectSale {
    pub id: DbId,
    pub project_id: DbId,
    pub buyer_name: String,
    pub buyer_email: Option<String>,
    pub buyer_phone: Option<String>,
    pub buyer_address: Option<String>,
    pub total_sale_price: Decimal,
    pub cash_amount: Decimal,
    pub credit_amount: Decimal,
    pub sale_date: CalendarDate,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire DTO for recording (or replacing) a project's sale.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProjectSale {
    pub buyer_name: Option<String>,
    pub buyer_email: Option<String>,
    pub buyer_phone: Option<String>,
    pub buyer_address: Option<String>,
    pub total_sale_price: Option<Decimal>,
    pub cash_amount: Option<Decimal>,
    pub credit_amount: Option<Decimal>,
    pub sale_date: Option<CalendarDate>,
    pub notes: Option<String>,
}

/// A validated sale record.
#[derive(Debug, Clone)]
pub struct NewProjectSale {
    pub buyer_name: String,
    pub buyer_email: Option<String>,
    pub buyer_phone: Option<String>,
    pub buyer_address: Option<String>,
    pub total_sale_price: Decimal,
    pub cash_amount: Decimal,
    pub credit_amount: Decimal,
    pub sale_date: CalendarDate,
    pub notes: Option<String>,
}
