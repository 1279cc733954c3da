use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::Either;
use tracing::debug;

use super::error::DbError;
use super::pool::ConnectionManager;
use super::query::Query;
use super::statements;
use super::value::{Cell, Table};

/// What the sidebar shows once the database answered the startup probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub host: String,
    pub database: String,
    pub table_count: i64,
}

impl ConnectionInfo {
    pub fn label(&self) -> String {
        format!("Connected to {}@{}", self.database, self.host)
    }
}

#[async_trait]
pub trait Backend: Send + Sync + 'static {
    /// Confirms the database is reachable and the schema exists.
    async fn probe(&self) -> Result<ConnectionInfo, DbError>;

    async fn fetch(&self, query: &Query) -> Result<Table, DbError>;

    /// Runs a write and commits it. Returns the affected row count.
    async fn execute(&self, query: &Query) -> Result<u64, DbError>;

    /// Invokes a stored procedure, returning each of its result sets.
    async fn call(&self, query: &Query) -> Result<Vec<Table>, DbError>;
}

pub struct MySqlBackend {
    manager: ConnectionManager,
}

impl MySqlBackend {
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Backend for MySqlBackend {
    async fn probe(&self) -> Result<ConnectionInfo, DbError> {
        let query = Query::new(statements::PROBE).bind(self.manager.database());
        let table = self.fetch(&query).await?;
        let table_count = table.scalar().and_then(Cell::as_i64).unwrap_or(0);

        Ok(ConnectionInfo {
            host: self.manager.host().to_string(),
            database: self.manager.database().to_string(),
            table_count,
        })
    }

    async fn fetch(&self, query: &Query) -> Result<Table, DbError> {
        let pool = self.manager.pool().await?;
        let rows = query.to_sqlx().fetch_all(pool).await?;
        debug!(sql = query.sql(), rows = rows.len(), "Fetched rows");
        Table::from_rows(&rows)
    }

    async fn execute(&self, query: &Query) -> Result<u64, DbError> {
        let pool = self.manager.pool().await?;

        // Dropping the transaction on an early return rolls it back.
        let mut tx = pool.begin().await?;
        let result = query.to_sqlx().execute(&mut *tx).await?;
        tx.commit().await?;

        debug!(
            sql = query.sql(),
            rows_affected = result.rows_affected(),
            "Committed statement"
        );
        Ok(result.rows_affected())
    }

    async fn call(&self, query: &Query) -> Result<Vec<Table>, DbError> {
        let pool = self.manager.pool().await?;
        let mut stream = query.to_sqlx().fetch_many(pool);

        let mut sets = Vec::new();
        let mut pending = Vec::new();
        while let Some(item) = stream.try_next().await? {
            match item {
                Either::Left(_) => sets.push(Table::from_rows(&std::mem::take(&mut pending))?),
                Either::Right(row) => pending.push(row),
            }
        }
        if !pending.is_empty() {
            sets.push(Table::from_rows(&pending)?);
        }

        debug!(sql = query.sql(), result_sets = sets.len(), "Procedure returned");
        Ok(strip_call_status(sets))
    }
}

/// Each result set of a `CALL` is closed by a status packet, and the call
/// itself ends with one more that carries no rows. Drop that trailing one,
/// but always hand back at least one (possibly empty) table.
pub fn strip_call_status(mut sets: Vec<Table>) -> Vec<Table> {
    if sets.len() > 1 && sets.last().is_some_and(Table::is_empty) {
        sets.pop();
    }
    if sets.is_empty() {
        sets.push(Table::default());
    }
    sets
}
