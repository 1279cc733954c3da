//! In-process stand-in for the MySQL schema, covering the fixed statement
//! set: foreign keys on `event_id`, `check_login_credentials` and
//! `get_event_summary`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::backend::{Backend, ConnectionInfo};
use super::error::DbError;
use super::query::{Param, Query};
use super::statements;
use super::value::{Cell, Table};

pub const SEED_EMAIL: &str = "organizer@example.com";
pub const SEED_PASSWORD: &str = "hunter2";
pub const SEED_USER_ID: i64 = 1;

struct Schema {
    users: Vec<(String, String, i64)>,
    events: Table,
    attendees: Table,
    vendors: Table,
    sponsors: Table,
}

pub struct MemoryBackend {
    schema: Mutex<Schema>,
    offline: AtomicBool,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self {
            schema: Mutex::new(Schema {
                users: Vec::new(),
                events: Table::new([
                    "id",
                    "title",
                    "description",
                    "location",
                    "start_time",
                    "end_time",
                    "user_id",
                ]),
                attendees: Table::new(["id", "event_id", "email"]),
                vendors: Table::new(["id", "event_id", "name", "service", "amount_to_be_paid"]),
                sponsors: Table::new(["id", "event_id", "name", "level", "contribution"]),
            }),
            offline: AtomicBool::new(false),
        }
    }
}

impl MemoryBackend {
    /// One registered user and one event owned by them.
    pub fn seeded() -> Self {
        let backend = Self::default();
        {
            let mut schema = backend.lock();
            schema
                .users
                .push((SEED_EMAIL.to_string(), SEED_PASSWORD.to_string(), SEED_USER_ID));
            schema.events.push_row(vec![
                Cell::Int(1),
                Cell::Text("Launch party".into()),
                Cell::Text("Opening night".into()),
                Cell::Text("Main hall".into()),
                Cell::Text("2025-05-01 18:00:00".into()),
                Cell::Text("2025-05-01 23:00:00".into()),
                Cell::Int(SEED_USER_ID),
            ]);
        }
        backend
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Schema> {
        self.schema.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ensure_online(&self) -> Result<(), DbError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(DbError::Connection(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

fn server_error(message: impl Into<String>) -> DbError {
    DbError::Query(sqlx::Error::Protocol(message.into()))
}

fn int(params: &[Param], index: usize) -> Result<i64, DbError> {
    match params.get(index) {
        Some(Param::Int(value)) => Ok(*value),
        other => Err(server_error(format!("expected integer parameter, got {other:?}"))),
    }
}

fn text(params: &[Param], index: usize) -> Result<String, DbError> {
    match params.get(index) {
        Some(Param::Text(value)) => Ok(value.clone()),
        other => Err(server_error(format!("expected text parameter, got {other:?}"))),
    }
}

fn decimal(params: &[Param], index: usize) -> Result<Decimal, DbError> {
    match params.get(index) {
        Some(Param::Decimal(value)) => Ok(*value),
        other => Err(server_error(format!("expected decimal parameter, got {other:?}"))),
    }
}

fn event_exists(schema: &Schema, event_id: i64) -> bool {
    schema
        .events
        .records()
        .any(|record| record.get("id").and_then(Cell::as_i64) == Some(event_id))
}

fn rows_for_event(table: &Table, event_id: i64) -> Table {
    let mut filtered = Table::new(table.columns.clone());
    for record in table.records() {
        if record.get("event_id").and_then(Cell::as_i64) == Some(event_id) {
            filtered.push_row(record.iter().map(|(_, cell)| cell.clone()).collect());
        }
    }
    filtered
}

fn insert_child(
    schema: &mut Schema,
    pick: fn(&mut Schema) -> &mut Table,
    table_name: &str,
    event_id: i64,
    rest: Vec<Cell>,
) -> Result<u64, DbError> {
    if !event_exists(schema, event_id) {
        return Err(server_error(format!(
            "1452 (23000): Cannot add or update a child row: a foreign key constraint fails (`{table_name}`, FOREIGN KEY (`event_id`) REFERENCES `events` (`id`))"
        )));
    }
    let table = pick(schema);
    let id = table.len() as i64 + 1;
    let mut cells = vec![Cell::Int(id), Cell::Int(event_id)];
    cells.extend(rest);
    table.push_row(cells);
    Ok(1)
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn probe(&self) -> Result<ConnectionInfo, DbError> {
        self.ensure_online()?;
        Ok(ConnectionInfo {
            host: "memory".to_string(),
            database: "event5".to_string(),
            table_count: 5,
        })
    }

    async fn fetch(&self, query: &Query) -> Result<Table, DbError> {
        self.ensure_online()?;
        let schema = self.lock();
        let params = query.params();

        match query.sql() {
            statements::LIST_EVENTS => {
                let mut events = schema.events.clone();
                events.rows.reverse();
                Ok(events)
            }
            statements::LIST_ATTENDEES => Ok(schema.attendees.clone()),
            statements::LIST_VENDORS => Ok(schema.vendors.clone()),
            statements::LIST_SPONSORS => Ok(schema.sponsors.clone()),
            statements::CHECK_LOGIN => {
                let email = text(params, 0)?;
                let password = text(params, 1)?;
                let id = schema
                    .users
                    .iter()
                    .find(|(e, p, _)| *e == email && *p == password)
                    .map_or(0, |(_, _, id)| *id);

                let mut table = Table::new([statements::CHECK_LOGIN.trim_start_matches("SELECT ")]);
                table.push_row(vec![Cell::Int(id)]);
                Ok(table)
            }
            other => Err(server_error(format!("1064 (42000): unsupported statement: {other}"))),
        }
    }

    async fn execute(&self, query: &Query) -> Result<u64, DbError> {
        self.ensure_online()?;
        let mut schema = self.lock();
        let params = query.params();

        match query.sql() {
            statements::INSERT_EVENT => {
                let user_id = int(params, 5)?;
                if !schema.users.iter().any(|(_, _, id)| *id == user_id) {
                    return Err(server_error(
                        "1452 (23000): Cannot add or update a child row: a foreign key constraint fails (`events`, FOREIGN KEY (`user_id`))",
                    ));
                }
                let id = schema.events.len() as i64 + 1;
                let mut cells = vec![Cell::Int(id)];
                for index in 0..5 {
                    cells.push(Cell::Text(text(params, index)?));
                }
                cells.push(Cell::Int(user_id));
                schema.events.push_row(cells);
                Ok(1)
            }
            statements::INSERT_ATTENDEE => {
                let event_id = int(params, 0)?;
                let email = Cell::Text(text(params, 1)?);
                insert_child(&mut schema, |s| &mut s.attendees, "attendees", event_id, vec![email])
            }
            statements::INSERT_VENDOR => {
                let event_id = int(params, 0)?;
                let rest = vec![
                    Cell::Text(text(params, 1)?),
                    Cell::Text(text(params, 2)?),
                    Cell::Decimal(decimal(params, 3)?),
                ];
                insert_child(&mut schema, |s| &mut s.vendors, "vendors", event_id, rest)
            }
            statements::INSERT_SPONSOR => {
                let event_id = int(params, 0)?;
                let rest = vec![
                    Cell::Text(text(params, 1)?),
                    Cell::Text(text(params, 2)?),
                    Cell::Decimal(decimal(params, 3)?),
                ];
                insert_child(&mut schema, |s| &mut s.sponsors, "sponsors", event_id, rest)
            }
            other => Err(server_error(format!("1064 (42000): unsupported statement: {other}"))),
        }
    }

    async fn call(&self, query: &Query) -> Result<Vec<Table>, DbError> {
        self.ensure_online()?;
        if query.sql() != statements::EVENT_SUMMARY {
            return Err(server_error(format!(
                "1305 (42000): PROCEDURE does not exist: {}",
                query.sql()
            )));
        }

        let schema = self.lock();
        let event_id = int(query.params(), 0)?;

        let mut event = Table::new(schema.events.columns.clone());
        for record in schema.events.records() {
            if record.get("id").and_then(Cell::as_i64) == Some(event_id) {
                event.push_row(record.iter().map(|(_, cell)| cell.clone()).collect());
            }
        }

        let vendor_total = rows_for_event(&schema.vendors, event_id)
            .records()
            .filter_map(|r| match r.get("amount_to_be_paid") {
                Some(Cell::Decimal(amount)) => Some(*amount),
                _ => None,
            })
            .sum::<Decimal>();
        let sponsor_total = rows_for_event(&schema.sponsors, event_id)
            .records()
            .filter_map(|r| match r.get("contribution") {
                Some(Cell::Decimal(amount)) => Some(*amount),
                _ => None,
            })
            .sum::<Decimal>();

        let mut totals = Table::new(["attendees", "vendor_total", "sponsor_total"]);
        totals.push_row(vec![
            Cell::Int(rows_for_event(&schema.attendees, event_id).len() as i64),
            Cell::Decimal(vendor_total),
            Cell::Decimal(sponsor_total),
        ]);

        Ok(vec![event, totals])
    }
}
