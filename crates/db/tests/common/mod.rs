#![allow(dead_code)]

//! Shared fixtures for repository tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sitebook_core::types::DbId;
use sqlx::PgPool;

use sitebook_db::models::category::{Category, NewCategory, NewSubcategory, Subcategory};
use sitebook_db::models::expense::NewExpense;
use sitebook_db::models::investment::NewInvestment;
use sitebook_db::models::investor::{Investor, NewInvestor};
use sitebook_db::models::project::{NewProject, Project};
use sitebook_db::repositories::{CategoryRepo, InvestorRepo, ProjectRepo};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn dec(v: i64) -> Decimal {
    Decimal::from(v)
}

pub async fn seed_project(pool: &PgPool, name: &str) -> Project {
    ProjectRepo::create(
        pool,
        &NewProject {
            name: name.to_string(),
            description: None,
            location: "Lahore".to_string(),
            start_date: date(2025, 1, 1),
            end_date: None,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_investor(pool: &PgPool, name: &str, email: &str) -> Investor {
    InvestorRepo::create(
        pool,
        &NewInvestor {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            address: None,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_category(pool: &PgPool, name: &str) -> (Category, Subcategory) {
    let category = CategoryRepo::create(
        pool,
        &NewCategory {
            name: name.to_string(),
            description: None,
            color_code: Some("#336699".to_string()),
        },
    )
    .await
    .unwrap();
    let subcategory = CategoryRepo::create_subcategory(
        pool,
        category.id,
        &NewSubcategory {
            name: format!("{name} Sub"),
            description: None,
        },
    )
    .await
    .unwrap();
    (category, subcategory)
}

pub fn new_investment(project_id: DbId, investor_id: DbId, amount: i64) -> NewInvestment {
    NewInvestment {
        project_id,
        investor_id,
        amount: dec(amount),
        investment_date: date(2025, 2, 1),
        description: None,
        payment_method: None,
        reference_number: None,
    }
}

pub fn new_expense(
    project_id: DbId,
    category_id: DbId,
    subcategory_id: DbId,
    amount: i64,
) -> NewExpense {
    NewExpense {
        project_id,
        category_id,
        subcategory_id,
        amount: dec(amount),
        description: "Materials".to_string(),
        vendor_name: None,
        invoice_number: None,
        expense_date: date(2025, 3, 1),
        payment_method: None,
        receipt_path: None,
    }
}
