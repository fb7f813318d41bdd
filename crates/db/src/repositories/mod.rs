//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Investment and expense
//! mutations maintain the stored aggregates through the helpers in
//! [`aggregates`], always inside the same transaction as the row change.

pub mod aggregates;
pub mod category_repo;
pub mod expense_repo;
pub mod investment_repo;
pub mod investor_repo;
pub mod project_repo;
pub mod sale_repo;

pub use category_repo::CategoryRepo;
pub use expense_repo::ExpenseRepo;
pub use investment_repo::InvestmentRepo;
pub use investor_repo::InvestorRepo;
pub use project_repo::ProjectRepo;
pub use sale_repo::ProjectSaleRepo;
