use serde::Deserialize;

use crate::db::{statements, Query};

/// Login form. Verification happens entirely inside the database.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn into_check(self) -> Query {
        Query::new(statements::CHECK_LOGIN)
            .bind(self.email)
            .bind(self.password)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
