//! Repository for the `todo_records` table.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use todos_core::query::Query;
use todos_core::storage::{StorageError, TodoRecordStorage};
use todos_core::todo_record::TodoRecord;
use todos_core::types::DbId;

use crate::models::todo_record::TodoRecordRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = r#"id, title, completed, "order", date"#;

/// Listing order: newest date first, then explicit order, then insertion.
const ORDER_BY: &str = r#"ORDER BY date DESC, "order" ASC, id ASC"#;

/// Provides CRUD operations for to-do records.
pub struct TodoRecordRepo;

impl TodoRecordRepo {
    /// List records matching `query` in listing order.
    pub async fn list(pool: &PgPool, query: &Query) -> Result<Vec<TodoRecordRow>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_filter(query);

        let mut sql = format!("SELECT {COLUMNS} FROM todo_records {where_clause} {ORDER_BY}");
        if query.pagination.is_some() {
            sql.push_str(&format!(" OFFSET ${bind_idx} LIMIT ${}", bind_idx + 1));
        }

        let mut q = bind_values_to(sqlx::query_as::<_, TodoRecordRow>(&sql), &bind_values);
        if let Some(pagination) = query.pagination {
            q = q.bind(pagination.offset()).bind(pagination.limit());
        }
        q.fetch_all(pool).await
    }

    /// Find a record by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TodoRecordRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todo_records WHERE id = $1");
        sqlx::query_as::<_, TodoRecordRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a record, returning the generated id. `todo.id` is ignored.
    pub async fn create(pool: &PgPool, todo: &TodoRecord) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            r#"INSERT INTO todo_records (title, completed, "order", date)
               VALUES ($1, $2, $3, $4)
               RETURNING id"#,
        )
        .bind(&todo.title)
        .bind(todo.completed)
        .bind(todo.order)
        .bind(todo.date.as_naive())
        .fetch_one(pool)
        .await
    }

    /// Replace every column of the record with `id`.
    ///
    /// Returns `false` if no row with the given `id` exists.
    pub async fn update(pool: &PgPool, id: DbId, todo: &TodoRecord) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"UPDATE todo_records
               SET title = $1, completed = $2, "order" = $3, date = $4
               WHERE id = $5"#,
        )
        .bind(&todo.title)
        .bind(todo.completed)
        .bind(todo.order)
        .bind(todo.date.as_naive())
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every record, returning how many were removed.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todo_records")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete a record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todo_records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// [`TodoRecordStorage`] backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgTodoRecordStorage {
    pool: PgPool,
}

impl PgTodoRecordStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRecordStorage for PgTodoRecordStorage {
    async fn get_all(&self, query: &Query) -> Result<Vec<TodoRecord>, StorageError> {
        let rows = TodoRecordRepo::list(&self.pool, query)
            .await
            .map_err(|e| StorageError::backend("unable to query the rows", e))?;
        Ok(rows.into_iter().map(TodoRecord::from).collect())
    }

    async fn get_single(&self, id: DbId) -> Result<TodoRecord, StorageError> {
        TodoRecordRepo::find_by_id(&self.pool, id)
            .await
            .map_err(|e| StorageError::backend("unable to query the row", e))?
            .map(TodoRecord::from)
            .ok_or(StorageError::NotFound)
    }

    async fn create(&self, todo: &TodoRecord) -> Result<DbId, StorageError> {
        TodoRecordRepo::create(&self.pool, todo)
            .await
            .map_err(|e| StorageError::backend("unable to insert the row", e))
    }

    async fn update(&self, id: DbId, todo: &TodoRecord) -> Result<(), StorageError> {
        let updated = TodoRecordRepo::update(&self.pool, id, todo)
            .await
            .map_err(|e| StorageError::backend("unable to update the row", e))?;
        if !updated {
            tracing::debug!(id, "Update matched no to-do record");
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        let deleted = TodoRecordRepo::delete_all(&self.pool)
            .await
            .map_err(|e| StorageError::backend("unable to delete the rows", e))?;
        tracing::debug!(deleted, "Deleted to-do record rows");
        Ok(())
    }

    async fn delete_single(&self, id: DbId) -> Result<(), StorageError> {
        TodoRecordRepo::delete(&self.pool, id)
            .await
            .map_err(|e| StorageError::backend("unable to delete the row", e))?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        crate::health_check(&self.pool)
            .await
            .map_err(|e| StorageError::backend("unable to ping the database", e))
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for the dynamically-built listing query.
#[derive(Debug, PartialEq)]
enum BindValue {
    Date(NaiveDate),
    Text(String),
}

/// Build a WHERE clause and bind values from `Query` filter parameters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The clause always
/// starts with `WHERE TRUE` so every filter can be appended with `AND`.
fn build_filter(query: &Query) -> (String, Vec<BindValue>, u32) {
    let mut where_clause = String::from("WHERE TRUE");
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(minimal_date) = query.minimal_date {
        where_clause.push_str(&format!(" AND date >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Date(minimal_date.as_naive()));
    }

    if let Some(maximal_date) = query.maximal_date {
        where_clause.push_str(&format!(" AND date <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Date(maximal_date.as_naive()));
    }

    if !query.title_fragment.is_empty() {
        where_clause.push_str(&format!(" AND lower(title) LIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!(
            "%{}%",
            query.title_fragment.to_lowercase()
        )));
    }

    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_values_to<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Date(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
        }
    }
    q
}
