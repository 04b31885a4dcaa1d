//! Repository layer.
//!
//! [`TodoRecordRepo`] is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument; [`PgTodoRecordStorage`]
//! owns a pool and exposes the repository through the core storage trait.

pub mod todo_record_repo;

pub use todo_record_repo::{PgTodoRecordStorage, TodoRecordRepo};
