//! Investor entity model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sitebook_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::investment::Investment;
use crate::models::project::Project;

/// An investor row from the `investors` table.
///
/// `total_investment` is the stored sum of this investor's investment
/// amounts across all projects, maintained by `InvestmentRepo`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Investor {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub total_investment: Decimal,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire DTO for creating an investor. Validated into [`NewInvestor`].
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvestor {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// A validated investor insert.
#[derive(Debug, Clone)]
pub struct NewInvestor {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// DTO for updating an investor. Only present fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvestor {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}

/// An investor's investments in one project, with the per-project subtotal.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectInvestmentGroup {
    pub project: Project,
    pub total_investment: Decimal,
    pub investments: Vec<Investment>,
}
