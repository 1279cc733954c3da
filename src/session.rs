//! Per-browser sessions keyed by a cookie-borne id.
//!
//! A session holds at most one authenticated user id. Only signed-in
//! sessions are stored; an anonymous visitor gets an id but no entry. There
//! is no expiry and nothing is persisted; a restart logs everybody out.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, HeaderValue};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::state::AppState;

pub const SESSION_COOKIE: &str = "event_console_session";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user_id: Option<i64>,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    secure_cookie: bool,
}

impl SessionStore {
    /// `secure_cookie` adds the `Secure` attribute, for HTTPS deployments.
    pub fn new(secure_cookie: bool) -> Self {
        Self {
            inner: Arc::default(),
            secure_cookie,
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn get(&self, id: Uuid) -> Option<Session> {
        self.inner.read().await.get(&id).cloned()
    }

    pub async fn save(&self, id: Uuid, session: Session) {
        self.inner.write().await.insert(id, session);
    }

    pub async fn remove(&self, id: Uuid) {
        self.inner.write().await.remove(&id);
    }

    /// Looks up the session named by the request cookie, or starts a new
    /// one. Ids this store does not hold are replaced rather than adopted.
    /// A new session is not stored until it signs in.
    pub async fn resolve(&self, headers: &HeaderMap) -> SessionContext {
        if let Some(id) = session_id(headers) {
            if let Some(session) = self.get(id).await {
                return SessionContext {
                    id,
                    session,
                    is_new: false,
                    store: self.clone(),
                };
            }
        }

        let id = Uuid::new_v4();
        debug!(session_id = %id, "Started session");

        SessionContext {
            id,
            session: Session::default(),
            is_new: true,
            store: self.clone(),
        }
    }
}

fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// The session attached to the current request.
pub struct SessionContext {
    id: Uuid,
    session: Session,
    is_new: bool,
    store: SessionStore,
}

impl SessionContext {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Option<i64> {
        self.session.user_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.user_id.is_some()
    }

    pub async fn sign_in(&mut self, user_id: i64) {
        self.session.user_id = Some(user_id);
        self.store.save(self.id, self.session.clone()).await;
        info!(session_id = %self.id, user_id, "Session authenticated");
    }

    pub async fn sign_out(&mut self) {
        self.session.user_id = None;
        self.store.remove(self.id).await;
        info!(session_id = %self.id, "Session logged out");
    }

    /// `Set-Cookie` value for a session the browser does not know yet.
    pub fn cookie(&self) -> Option<HeaderValue> {
        if !self.is_new {
            return None;
        }
        let secure = if self.store.secure_cookie { "; Secure" } else { "" };
        HeaderValue::from_str(&format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax{secure}",
            self.id
        ))
        .ok()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        Ok(state.sessions.resolve(&parts.headers).await)
    }
}
