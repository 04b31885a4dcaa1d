use chrono::NaiveDate;
use sqlx::FromRow;
use todos_core::date::Date;
use todos_core::todo_record::TodoRecord;
use todos_core::types::DbId;

/// A row from the `todo_records` table.
#[derive(Debug, Clone, FromRow)]
pub struct TodoRecordRow {
    pub id: DbId,
    pub title: String,
    pub completed: bool,
    pub order: i32,
    pub date: NaiveDate,
}

impl From<TodoRecordRow> for TodoRecord {
    fn from(row: TodoRecordRow) -> Self {
        Self {
            id: row.id,
            date: Date::new(row.date),
            title: row.title,
            completed: row.completed,
            order: row.order,
        }
    }
}
