use std::fmt;
use std::time::{Duration, Instant};

use sqlx::error::ErrorKind;

/// Longest operation label taken from a statement.
const MAX_OPERATION_LEN: usize = 16;

/// Statement class used to pick the label style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Select,
    Insert,
    Update,
    Delete,
    Other,
}

impl OperationKind {
    /// Exact, case-sensitive keyword match. Anything else is `Other`.
    pub fn classify(operation: &str) -> Self {
        match operation {
            "SELECT" => Self::Select,
            "INSERT" => Self::Insert,
            "UPDATE" => Self::Update,
            "DELETE" => Self::Delete,
            _ => Self::Other,
        }
    }
}

/// Failure of a single statement, as shown in the trace line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementError {
    pub type_name: String,
    pub message: String,
}

impl StatementError {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// The statement future was dropped before it produced a result.
    pub fn cancelled() -> Self {
        Self::new("cancelled", "statement dropped before completion")
    }
}

impl fmt::Display for StatementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)
    }
}

impl From<&sqlx::Error> for StatementError {
    fn from(err: &sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => {
                let kind = match db.kind() {
                    ErrorKind::UniqueViolation => "unique_violation".to_string(),
                    ErrorKind::ForeignKeyViolation => "foreign_key_violation".to_string(),
                    ErrorKind::NotNullViolation => "not_null_violation".to_string(),
                    ErrorKind::CheckViolation => "check_violation".to_string(),
                    _ => db
                        .code()
                        .map(|code| code.into_owned())
                        .unwrap_or_else(|| "database_error".to_string()),
                };
                Self::new(format!("pg: {kind}"), db.message())
            }
            other => Self::new(format!("sqlx::{}", variant_name(other)), other.to_string()),
        }
    }
}

fn variant_name(err: &sqlx::Error) -> &'static str {
    match err {
        sqlx::Error::Configuration(_) => "Configuration",
        sqlx::Error::Database(_) => "Database",
        sqlx::Error::Io(_) => "Io",
        sqlx::Error::Tls(_) => "Tls",
        sqlx::Error::Protocol(_) => "Protocol",
        sqlx::Error::RowNotFound => "RowNotFound",
        sqlx::Error::TypeNotFound { .. } => "TypeNotFound",
        sqlx::Error::ColumnIndexOutOfBounds { .. } => "ColumnIndexOutOfBounds",
        sqlx::Error::ColumnNotFound(_) => "ColumnNotFound",
        sqlx::Error::ColumnDecode { .. } => "ColumnDecode",
        sqlx::Error::Encode(_) => "Encode",
        sqlx::Error::Decode(_) => "Decode",
        sqlx::Error::PoolTimedOut => "PoolTimedOut",
        sqlx::Error::PoolClosed => "PoolClosed",
        sqlx::Error::WorkerCrashed => "WorkerCrashed",
        sqlx::Error::Migrate(_) => "Migrate",
        _ => "Error",
    }
}

/// One statement execution as seen by hooks.
///
/// Created right before dispatch and dropped after the last `after_query`
/// call. `error` is filled in by the access layer once the statement
/// finished.
#[derive(Debug, Clone)]
pub struct QueryEvent {
    pub operation: String,
    pub query: String,
    pub start_time: Instant,
    pub error: Option<StatementError>,
}

impl QueryEvent {
    /// Start an event now.
    pub fn new(query: impl Into<String>) -> Self {
        Self::started_at(query, Instant::now())
    }

    /// Start an event at a caller-supplied dispatch instant.
    pub fn started_at(query: impl Into<String>, start_time: Instant) -> Self {
        let query = query.into();
        Self {
            operation: statement_operation(&query),
            query,
            start_time,
            error: None,
        }
    }

    pub fn kind(&self) -> OperationKind {
        OperationKind::classify(&self.operation)
    }

    /// Time since dispatch. Never negative.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn set_error(&mut self, error: StatementError) {
        self.error = Some(error);
    }
}

/// First word of the statement, at most 16 characters, case preserved.
fn statement_operation(query: &str) -> String {
    query
        .split_whitespace()
        .next()
        .unwrap_or("")
        .chars()
        .take(MAX_OPERATION_LEN)
        .collect()
}
