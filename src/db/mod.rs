pub mod backend;
pub mod error;
#[cfg(test)]
pub mod memory;
pub mod pool;
pub mod query;
pub mod runner;
pub mod statements;
pub mod value;

pub use backend::{Backend, ConnectionInfo, MySqlBackend};
pub use error::DbError;
pub use pool::ConnectionManager;
pub use query::{Mode, Param, Query};
pub use runner::QueryRunner;
pub use value::{Cell, Record, Table};
