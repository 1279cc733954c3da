use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::db::Query;

pub mod attendee;
pub mod event;
pub mod sponsor;
pub mod summary;
pub mod user;
pub mod vendor;

pub use attendee::NewAttendee;
pub use event::NewEvent;
pub use sponsor::NewSponsor;
pub use summary::SummaryRequest;
pub use user::Credentials;
pub use vendor::NewVendor;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("You must login first.")]
    LoginRequired,

    #[error("{field} must be {rule}.")]
    Invalid {
        field: &'static str,
        rule: &'static str,
    },
}

/// A form payload that becomes exactly one INSERT.
pub trait Insertable: DeserializeOwned + Send + 'static {
    /// Listing re-run after every submission.
    const LISTING: &'static str;

    /// Builds the INSERT. `user_id` is the session's authenticated user.
    fn into_insert(self, user_id: Option<i64>) -> Result<Query, SubmitError>;

    /// Submitted values to show again in the re-rendered form, by field name.
    fn form_values(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Event ids are entered through an integer widget with a floor of 1.
pub fn parse_event_id(raw: &str) -> Result<i64, SubmitError> {
    let invalid = SubmitError::Invalid {
        field: "Event ID",
        rule: "a whole number of at least 1",
    };
    match raw.trim().parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(invalid),
    }
}

/// Money amounts are entered through a decimal widget with a floor of 0.
pub fn parse_amount(field: &'static str, raw: &str) -> Result<Decimal, SubmitError> {
    let invalid = SubmitError::Invalid {
        field,
        rule: "a number of at least 0",
    };
    match Decimal::from_str(raw.trim()) {
        Ok(amount) if !amount.is_sign_negative() => Ok(amount),
        _ => Err(invalid),
    }
}
