//! Browser console for the event-management MySQL database.
//!
//! Logs a user in through `check_login_credentials`, inserts and lists
//! events, attendees, vendors and sponsors, and shows the result sets of
//! `get_event_summary`. Constraints, triggers and aggregation all live in
//! the database; this crate renders forms and tables around it.

pub mod auth;
pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;
pub mod utils;
pub mod views;

include!(concat!(env!("OUT_DIR"), "/templates.rs"));
