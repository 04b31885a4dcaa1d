use std::fmt;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Path under which individual to-do records are addressable.
pub const TODO_RECORDS_PATH: &str = "/api/v1/todos";

/// Scheme and host of an inbound request, used to build absolute resource URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    pub scheme: String,
    pub host: String,
}

impl BaseUrl {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// Absolute URL of the to-do record with the given id.
    pub fn todo_record_url(&self, id: DbId) -> String {
        format!("{self}{TODO_RECORDS_PATH}/{id}")
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}
