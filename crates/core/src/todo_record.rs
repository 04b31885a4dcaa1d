//! To-do record models.
//!
//! - [`TodoRecord`] is the storage-facing entity.
//! - [`PresentationTodoRecord`] is what the API reads and writes; its `url` is
//!   synthesized on every response and never persisted.
//! - [`TodoRecordPatch`] describes a partial update.

use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::types::{BaseUrl, DbId};

/// A row of the `todo_records` table.
///
/// `id` is `0` until storage assigns one on create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoRecord {
    pub id: DbId,
    pub date: Date,
    pub title: String,
    pub completed: bool,
    pub order: i32,
}

impl TodoRecord {
    /// Apply every field present in `patch`, leaving the others untouched.
    pub fn patch(&mut self, patch: TodoRecordPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
    }
}

/// API-facing to-do record.
///
/// Missing JSON fields decode to their zero values and unknown fields are
/// ignored, so a create request may omit `url` entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationTodoRecord {
    pub url: String,
    pub date: Date,
    pub title: String,
    pub completed: bool,
    pub order: i32,
}

impl PresentationTodoRecord {
    pub fn new(base_url: &BaseUrl, todo: &TodoRecord) -> Self {
        Self {
            url: base_url.todo_record_url(todo.id),
            date: todo.date,
            title: todo.title.clone(),
            completed: todo.completed,
            order: todo.order,
        }
    }
}

/// Client-supplied `url` is discarded; the id stays unassigned.
impl From<PresentationTodoRecord> for TodoRecord {
    fn from(todo: PresentationTodoRecord) -> Self {
        Self {
            id: 0,
            date: todo.date,
            title: todo.title,
            completed: todo.completed,
            order: todo.order,
        }
    }
}

/// Partial update for a [`TodoRecord`]. `None` (absent or `null`) keeps the
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TodoRecordPatch {
    #[serde(default)]
    pub date: Option<Date>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub order: Option<i32>,
}
