use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;

use crate::models::{Credentials, SummaryRequest};
use crate::session::SessionContext;
use crate::state::AppState;
use crate::templates::statics::StaticFile;
use crate::utils::error::AppError;
use crate::utils::response::json;
use crate::views::entity::{self, EntityView};
use crate::views::{self, login, summary, Menu, RenderContext};

/// Liveness plus whether the database currently answers the probe.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let database = match state.runner.probe().await {
        Ok(_) => "connected",
        Err(_) => "unreachable",
    };

    json(json!({
        "status": "ok",
        "service": "event-console",
        "database": database,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct MenuSelection {
    menu: Option<String>,
}

/// `GET /?menu=<label>`. Unknown labels land on the login page.
pub async fn show(
    State(state): State<AppState>,
    session: SessionContext,
    selection: Result<Query<MenuSelection>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(selection) = selection.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let menu = selection
        .menu
        .as_deref()
        .and_then(Menu::from_label)
        .unwrap_or_default();

    let ctx = RenderContext::begin(&state, session).await?;
    let page = views::render(menu, &ctx).await;
    ctx.respond(menu, page)
}

pub async fn login(
    State(state): State<AppState>,
    session: SessionContext,
    form: Result<Form<Credentials>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(credentials) = form.map_err(|e| AppError::ValidationError(e.body_text()))?;

    let mut ctx = RenderContext::begin(&state, session).await?;
    let page = login::submit(&mut ctx, credentials).await;
    ctx.respond(Menu::Login, page)
}

pub async fn logout(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Response, AppError> {
    let mut ctx = RenderContext::begin(&state, session).await?;
    let page = login::logout(&mut ctx).await;
    ctx.respond(Menu::Login, page)
}

/// Form post for one of the record views.
pub async fn create<V: EntityView>(
    State(state): State<AppState>,
    session: SessionContext,
    form: Result<Form<V::Input>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(input) = form.map_err(|e| AppError::ValidationError(e.body_text()))?;

    let ctx = RenderContext::begin(&state, session).await?;
    let page = entity::submit::<V>(&ctx, input).await;
    ctx.respond(V::MENU, page)
}

pub async fn event_summary(
    State(state): State<AppState>,
    session: SessionContext,
    form: Result<Form<SummaryRequest>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(request) = form.map_err(|e| AppError::ValidationError(e.body_text()))?;

    let ctx = RenderContext::begin(&state, session).await?;
    let page = summary::submit(&ctx, request).await;
    ctx.respond(Menu::Summary, page)
}

pub async fn static_file(Path(name): Path<String>) -> Response {
    match StaticFile::get(&name) {
        Some(file) => (
            [
                (header::CONTENT_TYPE, "text/css; charset=utf-8"),
                (header::CACHE_CONTROL, "public, max-age=31536000, immutable"),
            ],
            file.content,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
