//! Sitebook domain core.
//!
//! Pure domain logic for the construction-project finance ledger: shared
//! types, error taxonomy, field validation, profit computation, and the
//! listing (search/sort/pagination) semantics. No I/O lives here; the
//! persistence and HTTP layers build on these primitives.

pub mod error;
pub mod listing;
pub mod pagination;
pub mod profit;
pub mod types;
pub mod validation;
