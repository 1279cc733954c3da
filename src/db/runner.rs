//! Query runner: every database failure becomes a notice on the page
//! instead of an error page.

use std::sync::Arc;

use tracing::error;

use super::backend::{Backend, ConnectionInfo};
use super::error::DbError;
use super::query::{Mode, Query};
use super::value::Table;
use crate::utils::response::Notices;

pub const MYSQL_ERROR: &str = "MySQL Error:";
pub const CONNECT_ERROR: &str =
    "Unable to connect to database. Check DB credentials / that MySQL is running.";

#[derive(Debug)]
pub enum Outcome {
    Rows(Table),
    Committed(u64),
}

#[derive(Clone)]
pub struct QueryRunner {
    backend: Arc<dyn Backend>,
}

impl QueryRunner {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    pub async fn probe(&self) -> Result<ConnectionInfo, DbError> {
        self.backend.probe().await
    }

    pub async fn run(&self, query: &Query, mode: Mode, notices: &mut Notices) -> Option<Outcome> {
        let result = match mode {
            Mode::Fetch => self.backend.fetch(query).await.map(Outcome::Rows),
            Mode::Execute => self.backend.execute(query).await.map(Outcome::Committed),
        };

        result
            .map_err(|err| report(query, &err, MYSQL_ERROR, notices))
            .ok()
    }

    pub async fn fetch(&self, query: &Query, notices: &mut Notices) -> Option<Table> {
        self.fetch_reporting(query, MYSQL_ERROR, notices).await
    }

    /// Like [`fetch`](Self::fetch) with a caller-chosen heading on failure.
    pub async fn fetch_reporting(
        &self,
        query: &Query,
        heading: &str,
        notices: &mut Notices,
    ) -> Option<Table> {
        self.backend
            .fetch(query)
            .await
            .map_err(|err| report(query, &err, heading, notices))
            .ok()
    }

    /// Returns `true` only when the statement was committed.
    pub async fn execute(&self, query: &Query, notices: &mut Notices) -> bool {
        matches!(
            self.run(query, Mode::Execute, notices).await,
            Some(Outcome::Committed(_))
        )
    }

    pub async fn call(
        &self,
        query: &Query,
        heading: &str,
        notices: &mut Notices,
    ) -> Option<Vec<Table>> {
        self.backend
            .call(query)
            .await
            .map_err(|err| report(query, &err, heading, notices))
            .ok()
    }
}

fn report(query: &Query, err: &DbError, heading: &str, notices: &mut Notices) {
    error!(sql = query.sql(), error = ?err, "Query failed");

    if err.is_connection() {
        notices.error_with_detail(CONNECT_ERROR, format!("{err:?}"));
    } else {
        notices.error_with_detail(format!("{heading} {err}"), format!("{err:?}"));
    }
}
