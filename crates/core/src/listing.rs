//! Project listing semantics: sort allow-list, direction folding, and
//! per-page clamping.
//!
//! Sort columns are interpolated into SQL, so only values from the
//! allow-list may ever leave this module. Unrecognized input falls back
//! silently rather than erroring; the listing endpoint is forgiving by
//! contract.

/// Sortable project columns. Anything else falls back to the default.
pub const PROJECT_SORT_COLUMNS: &[&str] = &[
    "name",
    "location",
    "start_date",
    "end_date",
    "is_completed",
    "is_sold",
    "created_at",
];

/// Default sort column for project listings.
pub const DEFAULT_PROJECT_SORT: &str = "start_date";

/// Smallest allowed page size.
pub const MIN_PER_PAGE: i64 = 1;
/// Largest allowed page size.
pub const MAX_PER_PAGE: i64 = 100;
/// Page size when the client does not ask for one.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Sort direction, folded from client input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Resolve a requested sort column against the allow-list.
///
/// Returns a `'static` column name safe for SQL interpolation; unknown or
/// absent input resolves to [`DEFAULT_PROJECT_SORT`].
pub fn resolve_sort_column(requested: Option<&str>) -> &'static str {
    match requested {
        Some(col) => PROJECT_SORT_COLUMNS
            .iter()
            .find(|allowed| **allowed == col)
            .copied()
            .unwrap_or(DEFAULT_PROJECT_SORT),
        None => DEFAULT_PROJECT_SORT,
    }
}

/// Resolve a requested sort direction. Only `asc` (case-insensitive)
/// yields ascending; everything else folds to descending.
pub fn resolve_sort_direction(requested: Option<&str>) -> SortDirection {
    match requested {
        Some(dir) if dir.eq_ignore_ascii_case("asc") => SortDirection::Asc,
        _ => SortDirection::Desc,
    }
}

/// Clamp a requested page size to `[MIN_PER_PAGE, MAX_PER_PAGE]`,
/// defaulting when absent.
pub fn clamp_per_page(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(MIN_PER_PAGE, MAX_PER_PAGE)
}

/// Page numbers are one-based; zero or negative input means page one.
pub fn clamp_page(requested: Option<i64>) -> i64 {
    requested.unwrap_or(1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sort_columns_pass_through() {
        for col in PROJECT_SORT_COLUMNS {
            assert_eq!(resolve_sort_column(Some(col)), *col);
        }
    }

    #[test]
    fn unknown_sort_column_falls_back_silently() {
        assert_eq!(resolve_sort_column(Some("unknown_field")), "start_date");
        assert_eq!(resolve_sort_column(Some("total_investment; DROP TABLE")), "start_date");
        assert_eq!(resolve_sort_column(None), "start_date");
    }

    #[test]
    fn direction_folds_to_desc_unless_asc() {
        assert_eq!(resolve_sort_direction(Some("asc")), SortDirection::Asc);
        assert_eq!(resolve_sort_direction(Some("ASC")), SortDirection::Asc);
        assert_eq!(resolve_sort_direction(Some("desc")), SortDirection::Desc);
        assert_eq!(resolve_sort_direction(Some("sideways")), SortDirection::Desc);
        assert_eq!(resolve_sort_direction(None), SortDirection::Desc);
    }

    #[test]
    fn per_page_clamps_to_bounds() {
        assert_eq!(clamp_per_page(None), DEFAULT_PER_PAGE);
        assert_eq!(clamp_per_page(Some(500)), 100);
        assert_eq!(clamp_per_page(Some(0)), 1);
        assert_eq!(clamp_per_page(Some(-3)), 1);
        assert_eq!(clamp_per_page(Some(25)), 25);
    }

    #[test]
    fn page_is_one_based() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(-1)), 1);
        assert_eq!(clamp_page(Some(4)), 4);
    }
}
