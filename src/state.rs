//! Application state shared across handlers

use std::sync::Arc;

use crate::db::{Backend, QueryRunner};
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub runner: QueryRunner,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            runner: QueryRunner::new(backend),
            sessions: SessionStore::default(),
        }
    }

    /// Marks session cookies `Secure`; set when serving over HTTPS.
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.sessions = SessionStore::new(secure);
        self
    }
}
