use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use quill_common::AppConfig;
use sqlx::postgres::{
    PgArguments, PgConnectOptions, PgPool, PgPoolOptions, PgQueryResult, PgRow, PgSslMode,
};
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::{Execute, FromRow, Postgres};
use thiserror::Error;

use crate::event::{QueryEvent, StatementError};
use crate::hook::{QueryContext, QueryHook};
use crate::logger::QueryLogger;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: sqlx::Error,
    },

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Connection settings for [`Database::connect`].
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub timeout: Duration,
    pub max_connections: u32,
    /// Attach a [`QueryLogger`] writing to stderr.
    pub enable_query_logging: bool,
}

impl DatabaseConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Plain TCP connection, no TLS.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(PgSslMode::Disable)
    }

    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.timeout)
    }
}

impl From<&AppConfig> for DatabaseConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            host: config.db_host.clone(),
            port: config.db_port,
            user: config.db_user.clone(),
            password: config.db_pass.clone(),
            database: config.db_name.clone(),
            timeout: config.db_timeout,
            max_connections: 10,
            enable_query_logging: config.enable_query_logging,
        }
    }
}

/// Postgres access layer.
///
/// Every statement goes through [`Database::run_hooked`]: registered hooks
/// see a [`QueryEvent`] before dispatch (in registration order) and after
/// completion (in reverse order). The driver's result is returned unchanged.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    hooks: Vec<Arc<dyn QueryHook>>,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbError> {
        let pool = config
            .pool_options()
            .connect_with(config.connect_options())
            .await
            .map_err(|source| DbError::Connect {
                addr: config.addr(),
                source,
            })?;

        tracing::info!(addr = %config.addr(), database = %config.database, "Connected to database");
        Ok(Self::configure(pool, config))
    }

    /// Pool that opens connections on first use.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let pool = config
            .pool_options()
            .connect_lazy_with(config.connect_options());
        Self::configure(pool, config)
    }

    fn configure(pool: PgPool, config: &DatabaseConfig) -> Self {
        let db = Self::from_pool(pool);
        if config.enable_query_logging {
            tracing::debug!("Query logging enabled");
            db.with_hook(QueryLogger::stderr())
        } else {
            db
        }
    }

    /// Wrap an existing pool with no hooks.
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool,
            hooks: Vec::new(),
        }
    }

    pub fn with_hook(self, hook: impl QueryHook + 'static) -> Self {
        self.add_hook(Arc::new(hook))
    }

    pub fn add_hook(mut self, hook: Arc<dyn QueryHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn hooks(&self) -> &[Arc<dyn QueryHook>] {
        &self.hooks
    }

    /// Raw pool. Statements issued on it directly bypass the hooks.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<(), DbError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection closed");
    }

    pub async fn execute<'q>(
        &self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Result<PgQueryResult, sqlx::Error> {
        let sql = query.sql();
        self.run_hooked(sql, query.execute(&self.pool)).await
    }

    pub async fn fetch_all<'q, O>(
        &self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> Result<Vec<O>, sqlx::Error>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        let sql = query.sql();
        self.run_hooked(sql, query.fetch_all(&self.pool)).await
    }

    pub async fn fetch_one<'q, O>(
        &self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> Result<O, sqlx::Error>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        let sql = query.sql();
        self.run_hooked(sql, query.fetch_one(&self.pool)).await
    }

    pub async fn fetch_optional<'q, O>(
        &self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> Result<Option<O>, sqlx::Error>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        let sql = query.sql();
        self.run_hooked(sql, query.fetch_optional(&self.pool)).await
    }

    pub async fn fetch_scalar<'q, O>(
        &self,
        query: QueryScalar<'q, Postgres, O, PgArguments>,
    ) -> Result<O, sqlx::Error>
    where
        O: Send + Unpin,
        (O,): Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        let sql = query.sql();
        self.run_hooked(sql, query.fetch_one(&self.pool)).await
    }

    /// Run one statement future wrapped in the hook protocol.
    ///
    /// `statement` must not have been polled yet; the event's start time is
    /// taken right before it is awaited. If this future is dropped before
    /// the statement finishes, the after hooks still run with a
    /// [`StatementError::cancelled`] error.
    pub async fn run_hooked<T, F>(&self, sql: &str, statement: F) -> Result<T, sqlx::Error>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        if self.hooks.is_empty() {
            return statement.await;
        }

        let event = QueryEvent::new(sql);
        let mut cx = QueryContext::current();
        for hook in &self.hooks {
            cx = hook.before_query(cx, &event);
        }

        let pending = PendingStatement {
            hooks: &self.hooks,
            cx,
            event,
            completed: false,
        };
        let result = statement.await;
        pending.complete(&result);

        result
    }
}

/// A dispatched statement whose after hooks have not run yet. They run on
/// drop, in reverse registration order.
struct PendingStatement<'a> {
    hooks: &'a [Arc<dyn QueryHook>],
    cx: QueryContext,
    event: QueryEvent,
    completed: bool,
}

impl PendingStatement<'_> {
    fn complete<T>(mut self, result: &Result<T, sqlx::Error>) {
        if let Err(err) = result {
            self.event.set_error(StatementError::from(err));
        }
        self.completed = true;
    }
}

impl Drop for PendingStatement<'_> {
    fn drop(&mut self) {
        if !self.completed {
            self.event.set_error(StatementError::cancelled());
        }
        for hook in self.hooks.iter().rev() {
            hook.after_query(&self.cx, &self.event);
        }
    }
}
