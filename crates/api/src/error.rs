use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use todos_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Every variant renders as a plain-text body holding its display message,
/// with no `Content-Type` header, and is logged exactly once.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A use-case failure. Always a 500, including a missing record.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Malformed client input.
    #[error("{0}")]
    BadRequest(String),

    /// No route matches the request path.
    #[error("Not Found")]
    NotFound,

    /// The response payload could not be serialized.
    #[error("unable to marshal the data: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Core(_) | AppError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %message, "Request rejected");
        }

        let mut response = Response::new(Body::from(message));
        *response.status_mut() = status;
        response
    }
}
