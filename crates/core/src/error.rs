use crate::storage::StorageError;

/// Failure of a use-case operation.
///
/// The display text names the attempted action followed by the storage
/// cause; it is returned verbatim to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("unable to get the to-do records: {0}")]
    GetAll(#[source] StorageError),

    #[error("unable to get the to-do record: {0}")]
    GetSingle(#[source] StorageError),

    #[error("unable to create the to-do record: {0}")]
    Create(#[source] StorageError),

    #[error("unable to update the to-do record: {0}")]
    Update(#[source] StorageError),

    #[error("unable to delete the to-do records: {0}")]
    DeleteAll(#[source] StorageError),

    #[error("unable to delete the to-do record: {0}")]
    DeleteSingle(#[source] StorageError),
}
