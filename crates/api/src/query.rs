//! Query-string parameters for listing endpoints.

use serde::Deserialize;
use todos_core::date::Date;
use todos_core::query::{Pagination, Query};

use crate::error::{AppError, AppResult};

/// Lower bound for `page_size` and `page`.
pub const MIN_PAGE_PARAM: i64 = 1;

/// Upper bound for `page_size` and `page`.
pub const MAX_PAGE_PARAM: i64 = i32::MAX as i64;

/// Raw `?minimal_date=&maximal_date=&title_fragment=&page_size=&page=` values.
///
/// Kept as strings so malformed values produce descriptive 400s. An empty
/// value counts as absent.
#[derive(Debug, Default, Deserialize)]
pub struct TodoListParams {
    pub minimal_date: Option<String>,
    pub maximal_date: Option<String>,
    pub title_fragment: Option<String>,
    pub page_size: Option<String>,
    pub page: Option<String>,
}

impl TodoListParams {
    /// Filter for `GET /todos`.
    pub fn into_query(self) -> AppResult<Query> {
        Ok(Query {
            minimal_date: date_param("minimal_date", self.minimal_date.as_deref())?,
            maximal_date: date_param("maximal_date", self.maximal_date.as_deref())?,
            pagination: pagination(self.page_size.as_deref(), self.page.as_deref())?,
            title_fragment: self.title_fragment.unwrap_or_default(),
        })
    }

    /// Filter for `GET /todos/{date}`. Date-range parameters are ignored.
    pub fn into_date_query(self, date: Date) -> AppResult<Query> {
        Ok(Query {
            pagination: pagination(self.page_size.as_deref(), self.page.as_deref())?,
            title_fragment: self.title_fragment.unwrap_or_default(),
            ..Query::for_date(date)
        })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parameter_error(key: &str, cause: impl std::fmt::Display) -> AppError {
    AppError::BadRequest(format!("unable to get the {key} parameter: {cause}"))
}

fn date_param(key: &str, value: Option<&str>) -> AppResult<Option<Date>> {
    present(value)
        .map(|v| Date::parse(v).map_err(|e| parameter_error(key, e)))
        .transpose()
}

fn int_param(key: &str, value: Option<&str>, min: i64, max: i64) -> AppResult<Option<i64>> {
    let Some(value) = present(value) else {
        return Ok(None);
    };

    let parsed: i64 = value
        .parse()
        .map_err(|e| parameter_error(key, format!("value is incorrect: {e}")))?;
    if parsed < min {
        return Err(parameter_error(key, "value is too small"));
    }
    if parsed > max {
        return Err(parameter_error(key, "value is too large"));
    }

    Ok(Some(parsed))
}

/// Paging applies only when both `page_size` and `page` are supplied.
fn pagination(page_size: Option<&str>, page: Option<&str>) -> AppResult<Option<Pagination>> {
    let page_size = int_param("page_size", page_size, MIN_PAGE_PARAM, MAX_PAGE_PARAM)?;
    let page = int_param("page", page, MIN_PAGE_PARAM, MAX_PAGE_PARAM)?;

    Ok(page_size
        .zip(page)
        .map(|(page_size, page)| Pagination { page_size, page }))
}
