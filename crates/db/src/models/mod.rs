//! Row structs mapped from database tables.

pub mod todo_record;
