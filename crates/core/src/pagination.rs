//! Page-based pagination metadata and navigation links.

use serde::Serialize;

/// Pagination metadata for a listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub last_page: i64,
    pub per_page: i64,
    pub total: i64,
}

impl PageMeta {
    /// Compute metadata from the total row count and the requested page.
    ///
    /// `last_page` is at least 1 even for an empty result set, and
    /// `current_page` may exceed it when the client pages past the end
    /// (the data array is simply empty then).
    pub fn new(total: i64, per_page: i64, current_page: i64) -> Self {
        let last_page = if total == 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            current_page,
            last_page,
            per_page,
            total,
        }
    }
}

/// Navigation links for a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    pub first: String,
    pub last: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

impl PageLinks {
    /// Build links for `base_path` (e.g. `/api/v1/projects`) from metadata.
    pub fn build(base_path: &str, meta: &PageMeta) -> Self {
        let url = |page: i64| format!("{base_path}?page={page}&per_page={}", meta.per_page);
        Self {
            first: url(1),
            last: url(meta.last_page),
            prev: (meta.current_page > 1).then(|| url(meta.current_page - 1)),
            next: (meta.current_page < meta.last_page).then(|| url(meta.current_page + 1)),
        }
    }
}

/// Row offset for a one-based page number.
pub fn page_offset(page: i64, per_page: i64) -> i64 {
    (page - 1) * per_page
}
