use serde::Deserialize;

use super::{parse_amount, parse_event_id, Insertable, SubmitError};
use crate::db::{statements, Query};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewSponsor {
    pub event_id: String,
    pub name: String,
    pub level: String,
    pub contribution: String,
}

impl Insertable for NewSponsor {
    const LISTING: &'static str = statements::LIST_SPONSORS;

    // No login check here; only event creation requires one.
    fn into_insert(self, _user_id: Option<i64>) -> Result<Query, SubmitError> {
        let event_id = parse_event_id(&self.event_id)?;
        let contribution = parse_amount("Contribution", &self.contribution)?;

        Ok(Query::new(statements::INSERT_SPONSOR)
            .bind(event_id)
            .bind(self.name)
            .bind(self.level)
            .bind(contribution))
    }

    fn form_values(&self) -> Vec<(&'static str, String)> {
        vec![
            ("event_id", self.event_id.clone()),
            ("name", self.name.clone()),
            ("level", self.level.clone()),
            ("contribution", self.contribution.clone()),
        ]
    }
}
