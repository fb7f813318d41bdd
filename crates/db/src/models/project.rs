//! Project entity model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sitebook_core::types::{CalendarDate, DbId, Timestamp};
use sqlx::FromRow;

use crate::models::expense::ExpenseWithCategory;
use crate::models::investment::InvestmentWithInvestor;
use crate::models::sale::ProjectSale;

/// A project row from the `projects` table.
///
/// `total_investment` and `total_expenses` are stored aggregates, re-summed
/// transactionally whenever a child investment/expense row changes. They are
/// never recomputed lazily at read time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub total_investment: Decimal,
    pub total_expenses: Decimal,
    pub sale_price: Option<Decimal>,
    pub credit_amount: Decimal,
    pub is_completed: bool,
    pub is_sold: bool,
    pub start_date: CalendarDate,
    pub end_date: Option<CalendarDate>,
    pub sale_date: Option<CalendarDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire DTO for creating a project. Validated into [`NewProject`].
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<CalendarDate>,
    pub end_date: Option<CalendarDate>,
}

/// A validated project insert.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub start_date: CalendarDate,
    pub end_date: Option<CalendarDate>,
}

/// DTO for updating a project. Only present fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<CalendarDate>,
    pub end_date: Option<CalendarDate>,
    pub is_completed: Option<bool>,
    pub is_sold: Option<bool>,
    pub sale_date: Option<CalendarDate>,
}

/// A fully-materialized project read: the row plus its eagerly-fetched
/// children. Built by `ProjectRepo::detail` with explicit batch queries.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub investments: Vec<InvestmentWithInvestor>,
    pub expenses: Vec<ExpenseWithCategory>,
    pub sale: Option<ProjectSale>,
}

/// One page of a project listing plus the unpaginated match count.
#[derive(Debug, Clone)]
pub struct ProjectPage {
    pub rows: Vec<Project>,
    pub total: i64,
}

/// Portfolio-wide counters for the statistics endpoint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectStatistics {
    pub total_projects: i64,
    pub completed_projects: i64,
    pub sold_projects: i64,
    pub active_projects: i64,
    pub total_investment: Decimal,
    pub total_expenses: Decimal,
}
