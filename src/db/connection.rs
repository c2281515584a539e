use futures::future::BoxFuture;
use futures::TryStreamExt;
use sqlx::postgres::{ PgConnectOptions, PgConnection, PgRow };
use sqlx::{ Connection, Either };

use crate::db::error::{ StoreError, StoreResult };
use crate::db::query::ComposedQuery;

/// Connection parameters for a single Postgres target. Defaults point at a
/// local development server; callers supply real credentials themselves.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DbConfig {
    pub fn new(host: &str, port: u16, user: &str, password: &str, database: &str) -> Self {
        Self {
            host: host.to_string(),
            port,
            user: user.to_string(),
            password: password.to_string(),
            database: database.to_string(),
        }
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "postgres".to_string(),
        }
    }
}

/// Outcome of a single statement: either the rows it produced, or the number
/// of rows a mutation touched.
pub enum ExecuteResult {
    Rows(Vec<PgRow>),
    Affected(u64),
}

// `PgRow` has no `Debug` impl, so the derive is spelled out by hand.
impl std::fmt::Debug for ExecuteResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rows(rows) => f.debug_tuple("Rows").field(&rows.len()).finish(),
            Self::Affected(n) => f.debug_tuple("Affected").field(n).finish(),
        }
    }
}

/// A wrapper around one physical Postgres connection.
///
/// There is no pooling and no internal synchronization; the `&mut self`
/// receivers mean one wrapper cannot run two statements in flight. Each
/// `execute` call spans exactly one implicit transaction.
pub struct Database {
    config: DbConfig,
    connection: Option<PgConnection>,
}

impl Database {
    /// Create a disconnected wrapper for the given target.
    pub fn new(config: DbConfig) -> Self {
        Self { config, connection: None }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Open the physical connection. A second call replaces the previous
    /// connection.
    pub async fn connect(&mut self) -> StoreResult<()> {
        let options = PgConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .username(&self.config.user)
            .password(&self.config.password)
            .database(&self.config.database);

        match PgConnection::connect_with(&options).await {
            Ok(connection) => {
                log::debug!(
                    "connected to {}:{}/{}",
                    self.config.host,
                    self.config.port,
                    self.config.database
                );
                self.connection = Some(connection);
                Ok(())
            }
            Err(e) => Err(StoreError::Connection(e.to_string())),
        }
    }

    /// Run one statement inside an implicit transaction.
    ///
    /// Rows are fetched eagerly before the commit; a statement that yields no
    /// rows is treated as a mutation and reported by affected-row count. Any
    /// driver error rolls the transaction back and surfaces as
    /// [`StoreError::Execution`].
    pub async fn execute(&mut self, query: ComposedQuery) -> StoreResult<ExecuteResult> {
        let connection = self.connection.as_mut().ok_or(StoreError::NoConnection)?;
        let (sql, arguments) = query.into_parts();

        let mut tx = connection
            .begin().await
            .map_err(|e| StoreError::Execution(e.to_string()))?;

        let streamed: Result<(Vec<PgRow>, u64), sqlx::Error> = {
            let mut results = sqlx::query_with(&sql, arguments).fetch_many(&mut *tx);
            let mut rows = Vec::new();
            let mut affected = 0u64;
            loop {
                match results.try_next().await {
                    Ok(Some(Either::Left(done))) => {
                        affected += done.rows_affected();
                    }
                    Ok(Some(Either::Right(row))) => rows.push(row),
                    Ok(None) => {
                        break Ok((rows, affected));
                    }
                    Err(e) => {
                        break Err(e);
                    }
                }
            }
        };

        match streamed {
            Ok((rows, affected)) => {
                tx.commit().await.map_err(|e| StoreError::Execution(e.to_string()))?;
                if rows.is_empty() {
                    Ok(ExecuteResult::Affected(affected))
                } else {
                    Ok(ExecuteResult::Rows(rows))
                }
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    log::warn!("rollback after failed statement also failed: {}", rollback_err);
                }
                Err(StoreError::Execution(e.to_string()))
            }
        }
    }

    /// Gracefully close the connection, if one is open.
    pub async fn close(&mut self) -> StoreResult<()> {
        match self.connection.take() {
            Some(connection) => {
                connection
                    .close().await
                    .map_err(|e| StoreError::Connection(e.to_string()))?;
                log::debug!("closed connection to {}:{}", self.config.host, self.config.port);
                Ok(())
            }
            None => Err(StoreError::AlreadyClosed),
        }
    }
}

/// Run `op` against a freshly connected [`Database`], closing the connection
/// on every exit path once `connect` has succeeded.
///
/// The callback shape follows sqlx's own `Connection::transaction`:
///
/// ```ignore
/// let count = with_database(config, |db| Box::pin(async move {
///     match db.execute(prepare("DELETE FROM users")).await? {
///         ExecuteResult::Affected(n) => Ok(n),
///         ExecuteResult::Rows(_) => Ok(0),
///     }
/// })).await?;
/// ```
pub async fn with_database<T, F>(config: DbConfig, op: F) -> StoreResult<T>
where
    F: for<'c> FnOnce(&'c mut Database) -> BoxFuture<'c, StoreResult<T>>,
{
    let mut db = Database::new(config);
    db.connect().await?;

    let result = op(&mut db).await;

    if let Err(close_err) = db.close().await {
        log::warn!("failed to close database connection: {}", close_err);
    }
    result
}
