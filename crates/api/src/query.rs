//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for the project list endpoint
/// (`?search=&page=&per_page=&sort_by=&sort_direction=`).
///
/// Unknown sort columns fall back to the default, directions other than
/// `asc` fold to `desc`, and `page`/`per_page` are clamped in
/// `sitebook_core::listing`.
#[derive(Debug, Deserialize)]
pub struct ProjectListParams {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}
