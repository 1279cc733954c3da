use serde::Deserialize;

use super::{Insertable, SubmitError};
use crate::db::{statements, Query};

/// Event form. Times are passed through as typed; the database parses them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_time: String,
    pub end_time: String,
}

impl Insertable for NewEvent {
    const LISTING: &'static str = statements::LIST_EVENTS;

    // form_values stays empty: the event form starts blank after a submit.
    fn into_insert(self, user_id: Option<i64>) -> Result<Query, SubmitError> {
        let user_id = user_id.ok_or(SubmitError::LoginRequired)?;

        Ok(Query::new(statements::INSERT_EVENT)
            .bind(self.title)
            .bind(self.description)
            .bind(self.location)
            .bind(self.start_time)
            .bind(self.end_time)
            .bind(user_id))
    }
}
