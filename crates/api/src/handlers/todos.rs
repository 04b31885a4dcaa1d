//! Handlers for to-do records.
//!
//! Successful reads and writes return the JSON presentation model; deletions
//! return `204 No Content`. Every failure is a plain-text body.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use todos_core::todo_record::{PresentationTodoRecord, TodoRecordPatch};

use crate::error::{AppError, AppResult};
use crate::extract::{
    date_segment, parse_date, parse_id, JsonBody, RequestBaseUrl, TodoId, TodoPath,
};
use crate::query::TodoListParams;
use crate::response;
use crate::state::AppState;

type ListParams = Result<Query<TodoListParams>, QueryRejection>;

fn list_params(params: ListParams) -> AppResult<TodoListParams> {
    params.map(|Query(params)| params).map_err(|e| {
        AppError::BadRequest(format!("unable to get the query parameters: {e}"))
    })
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/todos
///
/// List records, filtered by `minimal_date`, `maximal_date`,
/// `title_fragment` and paged by `page_size` + `page`.
pub async fn get_all(
    State(state): State<AppState>,
    RequestBaseUrl(base_url): RequestBaseUrl,
    params: ListParams,
) -> AppResult<Response> {
    let query = list_params(params)?.into_query()?;
    let todos = state.todo_records.get_all(&base_url, &query).await?;

    response::json(&todos)
}

/// GET /api/v1/todos/{*rest}
///
/// A path ending in a `YYYY-MM-DD` segment lists the records on that day
/// (title and paging parameters still apply); anything else is read as a
/// record id.
pub async fn get_by_segment(
    State(state): State<AppState>,
    RequestBaseUrl(base_url): RequestBaseUrl,
    TodoPath(rest): TodoPath,
    params: ListParams,
) -> AppResult<Response> {
    if let Some(segment) = date_segment(&rest) {
        let date = parse_date(segment)?;
        let query = list_params(params)?.into_date_query(date)?;
        let todos = state.todo_records.get_all(&base_url, &query).await?;
        return response::json(&todos);
    }

    let id = parse_id(&rest)?;
    let todo = state.todo_records.get_single(&base_url, id).await?;

    response::json(&todo)
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/v1/todos
pub async fn create(
    State(state): State<AppState>,
    RequestBaseUrl(base_url): RequestBaseUrl,
    JsonBody(input): JsonBody<PresentationTodoRecord>,
) -> AppResult<Response> {
    let todo = state.todo_records.create(&base_url, input).await?;
    tracing::info!(url = %todo.url, "To-do record created");

    response::json(&todo)
}

/// PUT /api/v1/todos/{id}
///
/// Replace every field of the record. Missing body fields take their zero
/// values.
pub async fn update(
    State(state): State<AppState>,
    RequestBaseUrl(base_url): RequestBaseUrl,
    TodoId(id): TodoId,
    JsonBody(input): JsonBody<PresentationTodoRecord>,
) -> AppResult<Response> {
    let todo = state.todo_records.update(&base_url, id, input).await?;
    tracing::info!(id, "To-do record updated");

    response::json(&todo)
}

/// PATCH /api/v1/todos/{id}
///
/// Overwrite only the fields present in the body.
pub async fn patch(
    State(state): State<AppState>,
    RequestBaseUrl(base_url): RequestBaseUrl,
    TodoId(id): TodoId,
    JsonBody(patch): JsonBody<TodoRecordPatch>,
) -> AppResult<Response> {
    let todo = state.todo_records.patch(&base_url, id, patch).await?;
    tracing::info!(id, "To-do record patched");

    response::json(&todo)
}

// ---------------------------------------------------------------------------
// Deletes
// ---------------------------------------------------------------------------

/// DELETE /api/v1/todos
pub async fn delete_all(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.todo_records.delete_all().await?;
    tracing::info!("All to-do records deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/todos/{id}
///
/// Deleting an id that does not exist still succeeds.
pub async fn delete_single(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> AppResult<StatusCode> {
    state.todo_records.delete_single(id).await?;
    tracing::info!(id, "To-do record deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Any path no route matches.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
