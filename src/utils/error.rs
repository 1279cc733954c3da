use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::db::DbError;
use crate::templates;
use crate::utils::response::{page, render};
use crate::views::Failure;

pub const STARTUP_TITLE: &str = "App failed to start";
pub const RENDER_FAILURE: &str = "An unexpected error occurred while rendering the page.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database connection error")]
    ConnectionError(#[source] DbError),

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConnectionError(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::TemplateError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::ConnectionError(_) => "CONNECTION_ERROR",
            AppError::TemplateError(_) => "TEMPLATE_ERROR",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ConnectionError(e) => {
                error!(error = ?e, code = self.code(), "Database unreachable");
            }
            _ => {
                error!(error = ?self, code = self.code(), "Application error");
            }
        }
    }

    /// Connection failures stop the whole page; anything else is reported
    /// as a rendering failure. Both keep the raw diagnostics visible.
    fn failure(&self) -> Failure {
        match self {
            AppError::ConnectionError(e) => Failure {
                title: STARTUP_TITLE,
                summary: "An exception occurred during startup. See details below.".to_string(),
                detail: format!("{e}\n\n{e:?}"),
            },
            other => Failure {
                title: "Error",
                summary: RENDER_FAILURE.to_string(),
                detail: format!("{other}\n\n{other:?}"),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        self.log();

        let failure = self.failure();
        match render(|buf| templates::failure_html(buf, &failure)) {
            Ok(body) => page(status, body, None),
            Err(e) => {
                error!(error = ?e, "Failed to render error page");
                (status, format!("{}\n\n{}", failure.summary, failure.detail)).into_response()
            }
        }
    }
}
