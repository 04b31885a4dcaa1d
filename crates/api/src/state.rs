use std::sync::Arc;

use todos_core::use_case::TodoRecordUseCase;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// To-do record use cases over the configured storage.
    pub todo_records: TodoRecordUseCase,
    /// Server configuration (URL scheme is read per request).
    pub config: Arc<ServerConfig>,
}
