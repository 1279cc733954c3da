use serde::Deserialize;

use super::{parse_amount, parse_event_id, Insertable, SubmitError};
use crate::db::{statements, Query};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewVendor {
    pub event_id: String,
    pub name: String,
    pub service: String,
    pub amount_to_be_paid: String,
}

impl Insertable for NewVendor {
    const LISTING: &'static str = statements::LIST_VENDORS;

    // No login check here; only event creation requires one.
    fn into_insert(self, _user_id: Option<i64>) -> Result<Query, SubmitError> {
        let event_id = parse_event_id(&self.event_id)?;
        let amount = parse_amount("Amount to be paid", &self.amount_to_be_paid)?;

        Ok(Query::new(statements::INSERT_VENDOR)
            .bind(event_id)
            .bind(self.name)
            .bind(self.service)
            .bind(amount))
    }

    fn form_values(&self) -> Vec<(&'static str, String)> {
        vec![
            ("event_id", self.event_id.clone()),
            ("name", self.name.clone()),
            ("service", self.service.clone()),
            ("amount_to_be_paid", self.amount_to_be_paid.clone()),
        ]
    }
}
