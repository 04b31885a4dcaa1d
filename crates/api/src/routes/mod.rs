pub mod health;
pub mod todos;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /todos                 list, create, delete all
/// /todos/{*rest}         get by id or date, create, replace, patch, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    todos::router()
}
