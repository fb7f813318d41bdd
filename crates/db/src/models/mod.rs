//! Entity models and DTOs.
//!
//! Each entity has a row struct (`FromRow` + `Serialize`), a wire-level
//! `Create*` DTO whose fields are all optional (so validation can report
//! per-field "required" errors instead of a serde rejection), a validated
//! `New*` struct the repositories insert from, and an `Update*` DTO where
//! only present fields are applied.

pub mod category;
pub mod expense;
pub mod investment;
pub mod investor;
pub mod project;
pub mod sale;
