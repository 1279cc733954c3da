use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::utils::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// A message shown inline on the page, with optional raw diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub detail: Option<String>,
}

impl Notice {
    pub fn class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "success",
            NoticeKind::Info => "info",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notices(Vec<Notice>);

impl Notices {
    pub fn success(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Success, text.into(), None);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Info, text.into(), None);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Error, text.into(), None);
    }

    pub fn error_with_detail(&mut self, text: impl Into<String>, detail: impl Into<String>) {
        self.push(NoticeKind::Error, text.into(), Some(detail.into()));
    }

    fn push(&mut self, kind: NoticeKind, text: String, detail: Option<String>) {
        self.0.push(Notice { kind, text, detail });
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notice> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|n| n.kind == NoticeKind::Error)
    }

    pub fn texts(&self) -> Vec<&str> {
        self.0.iter().map(|n| n.text.as_str()).collect()
    }

    pub fn extend(&mut self, other: Notices) {
        self.0.extend(other.0);
    }
}

/// Runs a compiled template into a string body.
pub fn render<F>(write: F) -> Result<String, AppError>
where
    F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
{
    let mut buf = Vec::new();
    write(&mut buf)?;
    String::from_utf8(buf).map_err(|e| AppError::InternalServerError(e.to_string()))
}

pub fn page(status: StatusCode, body: String, set_cookie: Option<HeaderValue>) -> Response {
    let mut response = (status, Html(body)).into_response();
    if let Some(cookie) = set_cookie {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}

pub fn json<T>(data: T) -> Response
where
    T: Serialize,
{
    (StatusCode::OK, Json(data)).into_response()
}
