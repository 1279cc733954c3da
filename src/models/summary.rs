use serde::Deserialize;

use super::{parse_event_id, SubmitError};
use crate::db::{statements, Query};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SummaryRequest {
    pub event_id: String,
}

impl SummaryRequest {
    pub fn into_call(self) -> Result<Query, SubmitError> {
        let event_id = parse_event_id(&self.event_id)?;
        Ok(Query::new(statements::EVENT_SUMMARY).bind(event_id))
    }
}
