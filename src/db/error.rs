use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unable to connect to database: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("{0}")]
    Query(#[source] sqlx::Error),

    #[error("Unsupported column type {0}")]
    Unsupported(String),
}

impl DbError {
    pub fn is_connection(&self) -> bool {
        matches!(self, DbError::Connection(_))
    }
}

impl From<sqlx::Error> for DbError {
    /// Transport-level failures mean the pool could not reach the server;
    /// everything else was raised by the server for this statement.
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Configuration(_) => DbError::Connection(err),
            other => DbError::Query(other),
        }
    }
}
