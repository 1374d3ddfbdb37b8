//! Database access layer with before/after statement hooks, and the
//! development query logger that renders one colored trace line per
//! executed statement.

pub mod database;
pub mod duration;
pub mod event;
pub mod hook;
pub mod logger;
pub mod style;

#[cfg(feature = "test-utils")]
pub mod testutil;

pub use database::{Database, DatabaseConfig, DbError};
pub use event::{OperationKind, QueryEvent, StatementError};
pub use hook::{QueryContext, QueryHook};
pub use logger::QueryLogger;
pub use style::{style_for, Color, LabelStyle, ERROR_STYLE};
