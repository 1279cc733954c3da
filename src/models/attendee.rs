use serde::Deserialize;

use super::{parse_event_id, Insertable, SubmitError};
use crate::db::{statements, Query};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewAttendee {
    pub event_id: String,
    pub email: String,
}

impl Insertable for NewAttendee {
    const LISTING: &'static str = statements::LIST_ATTENDEES;

    // No login check here; only event creation requires one.
    fn into_insert(self, _user_id: Option<i64>) -> Result<Query, SubmitError> {
        let event_id = parse_event_id(&self.event_id)?;

        Ok(Query::new(statements::INSERT_ATTENDEE)
            .bind(event_id)
            .bind(self.email))
    }

    fn form_values(&self) -> Vec<(&'static str, String)> {
        vec![
            ("event_id", self.event_id.clone()),
            ("email", self.email.clone()),
        ]
    }
}
