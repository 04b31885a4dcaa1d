//! Domain layer for the to-do service.
//!
//! Holds the value types and models shared by the storage gateway and the
//! HTTP surface, the [`storage::TodoRecordStorage`] capability the gateway
//! implements, and the use-case layer that sits between the two.

pub mod date;
pub mod error;
pub mod query;
pub mod storage;
pub mod todo_record;
pub mod types;
pub mod use_case;
