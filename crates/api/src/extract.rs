//! Request extractors shared by the to-do handlers.
//!
//! - [`RequestBaseUrl`]: scheme + host used to synthesize record URLs
//! - [`TodoPath`]: whatever follows `/todos/` in the request path
//! - [`TodoId`]: numeric record id found in that remainder
//! - [`JsonBody`]: JSON request body with plain-text 400 rejections
//!
//! All rejections are [`AppError::BadRequest`] so they render and log like
//! any other client error.

use std::sync::LazyLock;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::header::HOST;
use axum::http::request::Parts;
use regex::Regex;
use serde::de::DeserializeOwned;
use todos_core::date::{Date, DateParseError};
use todos_core::types::{BaseUrl, DbId};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// First run of digits that starts a path segment.
pub static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|/)(\d+)").expect("valid regex"));

/// The last segment of `rest` when it is laid out as a `YYYY-MM-DD` date.
pub fn date_segment(rest: &str) -> Option<&str> {
    rest.rsplit('/')
        .next()
        .filter(|segment| Date::has_wire_shape(segment))
}

/// Parse the record id from the path remainder after `/todos/`.
pub fn parse_id(rest: &str) -> AppResult<DbId> {
    let digits = ID_PATTERN
        .captures(rest)
        .and_then(|captures| captures.get(1))
        .ok_or_else(|| AppError::BadRequest("unable to get an ID: unable to find an ID".into()))?;

    digits.as_str().parse().map_err(|e| {
        AppError::BadRequest(format!("unable to get an ID: unable to parse the ID: {e}"))
    })
}

/// Parse a `YYYY-MM-DD` path segment.
pub fn parse_date(segment: &str) -> AppResult<Date> {
    Date::parse(segment).map_err(|e| match e {
        DateParseError::Shape(_) => {
            AppError::BadRequest("unable to get a date: unable to find a date".into())
        }
        DateParseError::Invalid(_) => AppError::BadRequest(format!("unable to get a date: {e}")),
    })
}

// ---------------------------------------------------------------------------
// Base URL
// ---------------------------------------------------------------------------

/// Scheme and host of the inbound request.
///
/// The scheme comes from configuration; the host from the `Host` header,
/// falling back to the request URI's authority.
#[derive(Debug, Clone)]
pub struct RequestBaseUrl(pub BaseUrl);

impl FromRequestParts<AppState> for RequestBaseUrl {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .ok_or_else(|| AppError::BadRequest("unable to find the request host".into()))?;

        Ok(RequestBaseUrl(BaseUrl::new(
            state.config.url_scheme.clone(),
            host,
        )))
    }
}

// ---------------------------------------------------------------------------
// Record id
// ---------------------------------------------------------------------------

/// The path remainder after `/todos/`, empty on routes without one.
#[derive(Debug, Clone, Default)]
pub struct TodoPath(pub String);

impl<S> FromRequestParts<S> for TodoPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let rest = Path::<String>::from_request_parts(parts, state)
            .await
            .map(|Path(rest)| rest)
            .unwrap_or_default();

        Ok(TodoPath(rest))
    }
}

/// Record id found in the [`TodoPath`].
///
/// Paths without an id reject with "unable to find an ID".
#[derive(Debug, Clone, Copy)]
pub struct TodoId(pub DbId);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TodoPath(rest) = TodoPath::from_request_parts(parts, state).await?;

        parse_id(&rest).map(TodoId)
    }
}

// ---------------------------------------------------------------------------
// JSON body
// ---------------------------------------------------------------------------

/// JSON request body.
///
/// Unlike `axum::Json`, the content type is not checked and every failure
/// is a 400 carrying the decoder's message.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            AppError::BadRequest(format!(
                "unable to get the request body: unable to read the JSON data: {e}"
            ))
        })?;

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            AppError::BadRequest(format!(
                "unable to get the request body: unable to unmarshal the JSON data: {e}"
            ))
        })
    }
}
