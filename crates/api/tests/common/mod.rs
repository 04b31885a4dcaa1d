#![allow(dead_code)]

use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use todos_api::config::ServerConfig;
use todos_api::router::build_app_router;
use todos_api::state::AppState;
use todos_core::query::Query;
use todos_core::storage::{StorageError, TodoRecordStorage};
use todos_core::todo_record::TodoRecord;
use todos_core::types::DbId;
use todos_core::use_case::TodoRecordUseCase;

/// Host header sent by every helper request.
pub const TEST_HOST: &str = "todos.test";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        db_max_connections: 1,
        url_scheme: "http".to_string(),
        cors_origins: Vec::new(),
        request_timeout_secs: 30,
    }
}

// ---------------------------------------------------------------------------
// In-memory storage
// ---------------------------------------------------------------------------

/// `TodoRecordStorage` over a `Vec`, listing with the same ordering and
/// filters as the PostgreSQL gateway.
#[derive(Default)]
pub struct MemoryStorage {
    records: Mutex<Vec<TodoRecord>>,
    next_id: Mutex<DbId>,
    failing: AtomicBool,
}

impl MemoryStorage {
    /// Make every subsequent call fail with a backend error.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<TodoRecord> {
        self.records.lock().unwrap().clone()
    }

    fn check(&self, context: &'static str) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::backend(context, "connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoRecordStorage for MemoryStorage {
    async fn get_all(&self, query: &Query) -> Result<Vec<TodoRecord>, StorageError> {
        self.check("unable to query the rows")?;

        let fragment = query.title_fragment.to_lowercase();
        let mut todos: Vec<TodoRecord> = self
            .records()
            .into_iter()
            .filter(|todo| query.minimal_date.map_or(true, |min| todo.date >= min))
            .filter(|todo| query.maximal_date.map_or(true, |max| todo.date <= max))
            .filter(|todo| todo.title.to_lowercase().contains(&fragment))
            .collect();
        todos.sort_by_key(|todo| (Reverse(todo.date), todo.order, todo.id));

        if let Some(pagination) = query.pagination {
            todos = todos
                .into_iter()
                .skip(pagination.offset() as usize)
                .take(pagination.limit() as usize)
                .collect();
        }
        Ok(todos)
    }

    async fn get_single(&self, id: DbId) -> Result<TodoRecord, StorageError> {
        self.check("unable to query the row")?;
        self.records()
            .into_iter()
            .find(|todo| todo.id == id)
            .ok_or(StorageError::NotFound)
    }

    async fn create(&self, todo: &TodoRecord) -> Result<DbId, StorageError> {
        self.check("unable to insert the row")?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        self.records.lock().unwrap().push(TodoRecord {
            id: *next_id,
            ..todo.clone()
        });
        Ok(*next_id)
    }

    async fn update(&self, id: DbId, todo: &TodoRecord) -> Result<(), StorageError> {
        self.check("unable to update the row")?;
        if let Some(stored) = self
            .records
            .lock()
            .unwrap()
            .iter_mut()
            .find(|stored| stored.id == id)
        {
            *stored = TodoRecord { id, ..todo.clone() };
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        self.check("unable to delete the rows")?;
        self.records.lock().unwrap().clear();
        Ok(())
    }

    async fn delete_single(&self, id: DbId) -> Result<(), StorageError> {
        self.check("unable to delete the row")?;
        self.records.lock().unwrap().retain(|todo| todo.id != id);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        self.check("unable to ping the database")
    }
}

// ---------------------------------------------------------------------------
// App + request helpers
// ---------------------------------------------------------------------------

/// Build the full application router over `storage`, with the same
/// middleware stack production uses.
pub fn build_test_app(storage: Arc<MemoryStorage>) -> Router {
    let config = test_config();
    let state = AppState {
        todo_records: TodoRecordUseCase::new(storage),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<&str>) -> Response<Body> {
    let body = body.map_or_else(Body::empty, |b| Body::from(b.to_string()));
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Host", TEST_HOST)
        .body(body)
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
