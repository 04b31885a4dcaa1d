//! Storage capability for to-do records.
//!
//! The PostgreSQL gateway in `todos_db` is the production implementation;
//! tests substitute in-memory doubles.

use async_trait::async_trait;

use crate::query::Query;
use crate::todo_record::TodoRecord;
use crate::types::DbId;

/// Boxed driver error carried inside [`StorageError::Backend`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No row has the requested id.
    #[error("no rows in result set")]
    NotFound,

    /// Any other failure of the underlying store.
    #[error("{context}: {source}")]
    Backend {
        context: &'static str,
        #[source]
        source: BoxError,
    },
}

impl StorageError {
    pub fn backend(context: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Backend {
            context,
            source: source.into(),
        }
    }
}

/// Durable CRUD over the `todo_records` table.
#[async_trait]
pub trait TodoRecordStorage: Send + Sync {
    /// Records matching `query`, ordered by date descending, then order
    /// ascending, then id ascending. No match yields an empty vector.
    async fn get_all(&self, query: &Query) -> Result<Vec<TodoRecord>, StorageError>;

    /// Fails with [`StorageError::NotFound`] when no row has `id`.
    async fn get_single(&self, id: DbId) -> Result<TodoRecord, StorageError>;

    /// Insert `todo` (its `id` is ignored) and return the generated id.
    async fn create(&self, todo: &TodoRecord) -> Result<DbId, StorageError>;

    /// Replace every field of the row with `id`. A missing row is not an error.
    async fn update(&self, id: DbId, todo: &TodoRecord) -> Result<(), StorageError>;

    async fn delete_all(&self) -> Result<(), StorageError>;

    /// Delete the row with `id`. A missing row is not an error.
    async fn delete_single(&self, id: DbId) -> Result<(), StorageError>;

    /// Verify the store is reachable.
    async fn health_check(&self) -> Result<(), StorageError>;
}
