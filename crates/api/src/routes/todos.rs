//! Route definitions for to-do records.
//!
//! Everything under `/todos/` is one item route: the remainder of the path is
//! searched for a record id (or, for GET, a trailing date), so trailing
//! slashes and deeper paths still reach a handler.

use axum::routing::{get, MethodRouter};
use axum::Router;

use crate::handlers::todos;
use crate::state::AppState;

/// ```text
/// GET    /todos              -> get_all
/// POST   /todos              -> create
/// DELETE /todos              -> delete_all
/// PUT    /todos              -> update (rejects: no id)
/// PATCH  /todos              -> patch (rejects: no id)
/// GET    /todos/{*rest}      -> get_by_segment (id or YYYY-MM-DD)
/// POST   /todos/{*rest}      -> create
/// PUT    /todos/{*rest}      -> update
/// PATCH  /todos/{*rest}      -> patch
/// DELETE /todos/{*rest}      -> delete_single
/// ```
///
/// `/todos/` is routed like `/todos/{*rest}` with an empty remainder.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/todos",
            get(todos::get_all)
                .post(todos::create)
                .put(todos::update)
                .patch(todos::patch)
                .delete(todos::delete_all),
        )
        .route("/todos/", item_routes())
        .route("/todos/{*rest}", item_routes())
}

fn item_routes() -> MethodRouter<AppState> {
    get(todos::get_by_segment)
        .post(todos::create)
        .put(todos::update)
        .patch(todos::patch)
        .delete(todos::delete_single)
}
