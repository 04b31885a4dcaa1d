//! Use-case layer for to-do records.
//!
//! Translates between storage and presentation models, synthesizes record
//! URLs, and wraps storage failures with the attempted action.

use std::sync::Arc;

use crate::error::CoreError;
use crate::query::Query;
use crate::storage::{StorageError, TodoRecordStorage};
use crate::todo_record::{PresentationTodoRecord, TodoRecord, TodoRecordPatch};
use crate::types::{BaseUrl, DbId};

/// Cheaply cloneable; the storage sits behind an `Arc`.
#[derive(Clone)]
pub struct TodoRecordUseCase {
    storage: Arc<dyn TodoRecordStorage>,
}

impl TodoRecordUseCase {
    pub fn new(storage: Arc<dyn TodoRecordStorage>) -> Self {
        Self { storage }
    }

    pub async fn get_all(
        &self,
        base_url: &BaseUrl,
        query: &Query,
    ) -> Result<Vec<PresentationTodoRecord>, CoreError> {
        let todos = self
            .storage
            .get_all(query)
            .await
            .map_err(CoreError::GetAll)?;
        tracing::debug!(count = todos.len(), "Fetched to-do records");

        Ok(todos
            .iter()
            .map(|todo| PresentationTodoRecord::new(base_url, todo))
            .collect())
    }

    pub async fn get_single(
        &self,
        base_url: &BaseUrl,
        id: DbId,
    ) -> Result<PresentationTodoRecord, CoreError> {
        let todo = self
            .storage
            .get_single(id)
            .await
            .map_err(CoreError::GetSingle)?;

        Ok(PresentationTodoRecord::new(base_url, &todo))
    }

    pub async fn create(
        &self,
        base_url: &BaseUrl,
        input: PresentationTodoRecord,
    ) -> Result<PresentationTodoRecord, CoreError> {
        let mut todo = TodoRecord::from(input);
        todo.id = self
            .storage
            .create(&todo)
            .await
            .map_err(CoreError::Create)?;
        tracing::debug!(id = todo.id, "Created to-do record");

        Ok(PresentationTodoRecord::new(base_url, &todo))
    }

    pub async fn update(
        &self,
        base_url: &BaseUrl,
        id: DbId,
        input: PresentationTodoRecord,
    ) -> Result<PresentationTodoRecord, CoreError> {
        self.store(base_url, id, TodoRecord::from(input)).await
    }

    /// Read the current record, apply `patch`, and write it back.
    ///
    /// A failed read returns before anything is written.
    pub async fn patch(
        &self,
        base_url: &BaseUrl,
        id: DbId,
        patch: TodoRecordPatch,
    ) -> Result<PresentationTodoRecord, CoreError> {
        let mut todo = self
            .storage
            .get_single(id)
            .await
            .map_err(CoreError::GetSingle)?;
        todo.patch(patch);

        self.store(base_url, id, todo).await
    }

    pub async fn delete_all(&self) -> Result<(), CoreError> {
        self.storage
            .delete_all()
            .await
            .map_err(CoreError::DeleteAll)?;
        tracing::debug!("Deleted all to-do records");
        Ok(())
    }

    pub async fn delete_single(&self, id: DbId) -> Result<(), CoreError> {
        self.storage
            .delete_single(id)
            .await
            .map_err(CoreError::DeleteSingle)?;
        tracing::debug!(id, "Deleted to-do record");
        Ok(())
    }

    /// Probe the underlying storage.
    pub async fn health_check(&self) -> Result<(), StorageError> {
        self.storage.health_check().await
    }

    async fn store(
        &self,
        base_url: &BaseUrl,
        id: DbId,
        mut todo: TodoRecord,
    ) -> Result<PresentationTodoRecord, CoreError> {
        self.storage
            .update(id, &todo)
            .await
            .map_err(CoreError::Update)?;
        todo.id = id;
        tracing::debug!(id, "Updated to-do record");

        Ok(PresentationTodoRecord::new(base_url, &todo))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::date::Date;

    /// Storage double that records calls and replays canned results.
    #[derive(Default)]
    struct RecordingStorage {
        calls: Mutex<Vec<String>>,
        records: Vec<TodoRecord>,
        next_id: DbId,
        fail: bool,
    }

    impl RecordingStorage {
        fn with_records(records: Vec<TodoRecord>) -> Self {
            Self {
                records,
                ..Default::default()
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn record(&self, call: String) -> Result<(), StorageError> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                return Err(StorageError::backend("unable to reach the store", "timeout"));
            }
            Ok(())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TodoRecordStorage for RecordingStorage {
        async fn get_all(&self, query: &Query) -> Result<Vec<TodoRecord>, StorageError> {
            self.record(format!("get_all {:?}", query.title_fragment))?;
            Ok(self.records.clone())
        }

        async fn get_single(&self, id: DbId) -> Result<TodoRecord, StorageError> {
            self.record(format!("get_single {id}"))?;
            self.records
                .iter()
                .find(|todo| todo.id == id)
                .cloned()
                .ok_or(StorageError::NotFound)
        }

        async fn create(&self, todo: &TodoRecord) -> Result<DbId, StorageError> {
            self.record(format!("create {}", todo.title))?;
            Ok(self.next_id)
        }

        async fn update(&self, id: DbId, todo: &TodoRecord) -> Result<(), StorageError> {
            self.record(format!("update {id} {:?}", todo))
        }

        async fn delete_all(&self) -> Result<(), StorageError> {
            self.record("delete_all".to_string())
        }

        async fn delete_single(&self, id: DbId) -> Result<(), StorageError> {
            self.record(format!("delete_single {id}"))
        }

        async fn health_check(&self) -> Result<(), StorageError> {
            self.record("health_check".to_string())
        }
    }

    fn base_url() -> BaseUrl {
        BaseUrl::new("http", "example.com")
    }

    fn todo(id: DbId, title: &str) -> TodoRecord {
        TodoRecord {
            id,
            date: Date::from_ymd(2006, 1, 2).unwrap(),
            title: title.to_string(),
            completed: true,
            order: 42,
        }
    }

    fn use_case(storage: &Arc<RecordingStorage>) -> TodoRecordUseCase {
        TodoRecordUseCase::new(Arc::clone(storage) as Arc<dyn TodoRecordStorage>)
    }

    // -- get_all --

    #[tokio::test]
    async fn get_all_maps_records_to_presentation() {
        let storage = Arc::new(RecordingStorage::with_records(vec![
            todo(5, "test"),
            todo(23, "test2"),
        ]));
        let todos = use_case(&storage)
            .get_all(&base_url(), &Query::default())
            .await
            .unwrap();

        let urls: Vec<_> = todos.iter().map(|todo| todo.url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "http://example.com/api/v1/todos/5",
                "http://example.com/api/v1/todos/23"
            ]
        );
    }

    #[tokio::test]
    async fn get_all_without_matches_is_empty() {
        let storage = Arc::new(RecordingStorage::default());
        let todos = use_case(&storage)
            .get_all(&base_url(), &Query::default())
            .await
            .unwrap();
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn get_all_failure_is_wrapped() {
        let storage = Arc::new(RecordingStorage::failing());
        let err = use_case(&storage)
            .get_all(&base_url(), &Query::default())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "unable to get the to-do records: unable to reach the store: timeout"
        );
    }

    // -- get_single --

    #[tokio::test]
    async fn get_single_missing_record_is_not_found() {
        let storage = Arc::new(RecordingStorage::default());
        let err = use_case(&storage)
            .get_single(&base_url(), 7)
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::GetSingle(StorageError::NotFound));
    }

    // -- create --

    #[tokio::test]
    async fn create_assigns_storage_id_and_ignores_client_url() {
        let storage = Arc::new(RecordingStorage {
            next_id: 23,
            ..Default::default()
        });
        let input = PresentationTodoRecord {
            url: "http://spoofed/api/v1/todos/1".to_string(),
            title: "test".to_string(),
            ..Default::default()
        };

        let created = use_case(&storage).create(&base_url(), input).await.unwrap();

        assert_eq!(created.url, "http://example.com/api/v1/todos/23");
        assert_eq!(created.title, "test");
        assert_eq!(storage.calls(), ["create test"]);
    }

    // -- update --

    #[tokio::test]
    async fn update_returns_record_under_requested_id() {
        let storage = Arc::new(RecordingStorage::default());
        let input = PresentationTodoRecord {
            title: "replaced".to_string(),
            order: 3,
            ..Default::default()
        };

        let updated = use_case(&storage)
            .update(&base_url(), 12, input)
            .await
            .unwrap();

        assert_eq!(updated.url, "http://example.com/api/v1/todos/12");
        assert_eq!(updated.order, 3);
    }

    // -- patch --

    #[tokio::test]
    async fn patch_reads_then_writes_merged_record() {
        let storage = Arc::new(RecordingStorage::with_records(vec![todo(23, "test")]));
        let patch = TodoRecordPatch {
            title: Some("test2".to_string()),
            ..Default::default()
        };

        let patched = use_case(&storage)
            .patch(&base_url(), 23, patch)
            .await
            .unwrap();

        assert_eq!(patched.title, "test2");
        assert!(patched.completed);
        assert_eq!(patched.order, 42);
        let expected = TodoRecord {
            title: "test2".to_string(),
            ..todo(23, "test")
        };
        assert_eq!(
            storage.calls(),
            ["get_single 23".to_string(), format!("update 23 {:?}", expected)]
        );
    }

    #[tokio::test]
    async fn patch_never_writes_when_read_fails() {
        let storage = Arc::new(RecordingStorage::default());
        let err = use_case(&storage)
            .patch(&base_url(), 9, TodoRecordPatch::default())
            .await
            .unwrap_err();

        assert_matches!(err, CoreError::GetSingle(StorageError::NotFound));
        assert_eq!(storage.calls(), ["get_single 9"]);
    }

    // -- delete --

    #[tokio::test]
    async fn delete_failures_are_wrapped() {
        let storage = Arc::new(RecordingStorage::failing());
        let use_case = use_case(&storage);

        assert_matches!(use_case.delete_all().await, Err(CoreError::DeleteAll(_)));
        assert_matches!(
            use_case.delete_single(4).await,
            Err(CoreError::DeleteSingle(_))
        );
        assert_eq!(storage.calls(), ["delete_all", "delete_single 4"]);
    }
}
