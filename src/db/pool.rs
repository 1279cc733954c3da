//! Connection manager.
//!
//! The pool is built on first use and then shared for the life of the
//! process. A failed build is not remembered, so the next caller tries again.

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tokio::sync::OnceCell;
use tracing::info;

use super::error::DbError;
use crate::config::DatabaseConfig;

/// Upper bound on simultaneously checked-out connections.
pub const MAX_CONNECTIONS: u32 = 5;

pub struct ConnectionManager {
    options: MySqlConnectOptions,
    host: String,
    database: String,
    pool: OnceCell<MySqlPool>,
}

impl ConnectionManager {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            options: config.connect_options(),
            host: config.host.clone(),
            database: config.name.clone(),
            pool: OnceCell::new(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub async fn pool(&self) -> Result<&MySqlPool, DbError> {
        self.pool
            .get_or_try_init(|| async {
                let pool = MySqlPoolOptions::new()
                    .max_connections(MAX_CONNECTIONS)
                    .connect_with(self.options.clone())
                    .await
                    .map_err(DbError::Connection)?;

                info!(
                    host = %self.host,
                    database = %self.database,
                    max_connections = MAX_CONNECTIONS,
                    "Database pool established"
                );
                Ok::<_, DbError>(pool)
            })
            .await
    }
}
