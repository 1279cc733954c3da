use rust_decimal::Decimal;
use sqlx::mysql::{MySql, MySqlArguments};

#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Int(i64),
    Text(String),
    Decimal(Decimal),
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<Decimal> for Param {
    fn from(value: Decimal) -> Self {
        Param::Decimal(value)
    }
}

/// A fixed statement plus its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    sql: &'static str,
    params: Vec<Param>,
}

/// Whether a statement returns rows or is committed for its side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Fetch,
    Execute,
}

impl Query {
    pub fn new(sql: &'static str) -> Self {
        Self {
            sql,
            params: Vec::new(),
        }
    }

    pub fn bind(mut self, param: impl Into<Param>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn sql(&self) -> &'static str {
        self.sql
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub(crate) fn to_sqlx(&self) -> sqlx::query::Query<'_, MySql, MySqlArguments> {
        self.params
            .iter()
            .fold(sqlx::query(self.sql), |query, param| match param {
                Param::Int(value) => query.bind(*value),
                Param::Text(value) => query.bind(value.as_str()),
                Param::Decimal(value) => query.bind(*value),
            })
    }
}
