//! Filter and paging parameters for listing to-do records.

use crate::date::Date;

/// Filters for [`TodoRecordStorage::get_all`](crate::storage::TodoRecordStorage::get_all).
///
/// Every filter is optional; an empty `title_fragment` means no title filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub minimal_date: Option<Date>,
    pub maximal_date: Option<Date>,
    pub title_fragment: String,
    pub pagination: Option<Pagination>,
}

impl Query {
    /// Records dated exactly `date`.
    pub fn for_date(date: Date) -> Self {
        Self {
            minimal_date: Some(date),
            maximal_date: Some(date),
            ..Default::default()
        }
    }
}

/// One-based page selection. Both fields are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_size: i64,
    pub page: i64,
}

impl Pagination {
    /// Number of rows to skip before the requested page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).max(0).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}
