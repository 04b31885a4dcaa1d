//! JSON response rendering for API handlers.

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderValue;
use axum::response::Response;
use serde::Serialize;

use crate::error::AppResult;

/// Serialize `data` as a `200 OK` JSON response.
///
/// Serialization failures surface as [`AppError::Encoding`](crate::error::AppError::Encoding).
pub fn json<T: Serialize + ?Sized>(data: &T) -> AppResult<Response> {
    let bytes = serde_json::to_vec(data)?;

    let mut response = Response::new(Body::from(bytes));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(response)
}
