//! Page models handed to the compiled templates, and the menu router.

use axum::http::StatusCode;
use axum::response::Response;

use crate::db::{ConnectionInfo, QueryRunner, Table};
use crate::session::SessionContext;
use crate::state::AppState;
use crate::templates;
use crate::utils::error::AppError;
use crate::utils::response::{page as page_response, render as render_template, Notices};

pub mod attendees;
pub mod entity;
pub mod events;
pub mod login;
pub mod sponsors;
pub mod summary;
pub mod vendors;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Menu {
    #[default]
    Login,
    Events,
    Attendees,
    Vendors,
    Sponsors,
    Summary,
}

impl Menu {
    pub const ALL: [Menu; 6] = [
        Menu::Login,
        Menu::Events,
        Menu::Attendees,
        Menu::Vendors,
        Menu::Sponsors,
        Menu::Summary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Menu::Login => "Login / Status",
            Menu::Events => "Events",
            Menu::Attendees => "Attendees",
            Menu::Vendors => "Vendors",
            Menu::Sponsors => "Sponsors",
            Menu::Summary => "Event Summary",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|menu| menu.label() == label)
    }
}

pub struct MenuOption {
    pub label: &'static str,
    pub selected: bool,
}

/// Everything around the page body: menu, connection and session status.
pub struct Shell {
    pub menu: Menu,
    pub connection: String,
    pub user_id: Option<i64>,
}

impl Shell {
    pub fn menu_options(&self) -> Vec<MenuOption> {
        Menu::ALL
            .into_iter()
            .map(|menu| MenuOption {
                label: menu.label(),
                selected: menu == self.menu,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Password,
    TextArea,
    Integer,
    Decimal,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub min: Option<&'static str>,
    pub step: Option<&'static str>,
    pub value: Option<String>,
}

impl Field {
    fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            min: None,
            step: None,
            value: None,
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn password(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Password)
    }

    pub fn textarea(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::TextArea)
    }

    /// Whole number, at least 1, starting at 1.
    pub fn event_id(name: &'static str) -> Self {
        Self {
            min: Some("1"),
            step: Some("1"),
            value: Some("1".to_string()),
            ..Self::new(name, "Event ID", FieldKind::Integer)
        }
    }

    /// Non-negative amount, starting at 0.
    pub fn amount(name: &'static str, label: &'static str) -> Self {
        Self {
            min: Some("0"),
            step: Some("0.01"),
            value: Some("0.00".to_string()),
            ..Self::new(name, label, FieldKind::Decimal)
        }
    }

    /// Current content, for textareas.
    pub fn content(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    pub fn is_textarea(&self) -> bool {
        self.kind == FieldKind::TextArea
    }

    pub fn input_type(&self) -> &'static str {
        match self.kind {
            FieldKind::Text | FieldKind::TextArea => "text",
            FieldKind::Password => "password",
            FieldKind::Integer | FieldKind::Decimal => "number",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Form {
    pub action: &'static str,
    pub submit_label: &'static str,
    pub fields: Vec<Field>,
}

impl Form {
    /// Pre-fills fields by name. Blank values keep the field's default.
    pub fn fill(mut self, values: Vec<(&'static str, String)>) -> Self {
        for (name, value) in values {
            if value.trim().is_empty() {
                continue;
            }
            if let Some(field) = self.fields.iter_mut().find(|field| field.name == name) {
                field.value = Some(value);
            }
        }
        self
    }
}

/// A result set flattened to display strings.
#[derive(Debug, Clone, Default)]
pub struct TableView {
    pub caption: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    empty_message: Option<&'static str>,
}

impl TableView {
    pub fn from_table(table: &Table, empty_message: Option<&'static str>) -> Self {
        Self {
            caption: None,
            columns: table.columns.clone(),
            rows: table
                .rows
                .iter()
                .map(|row| row.iter().map(ToString::to_string).collect())
                .collect(),
            empty_message,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// The message shown instead of the table when there is nothing to list.
    pub fn empty_notice(&self) -> Option<&'static str> {
        if self.rows.is_empty() {
            self.empty_message
        } else {
            None
        }
    }
}

pub struct Page {
    pub heading: &'static str,
    pub notices: Notices,
    pub forms: Vec<Form>,
    pub tables: Vec<TableView>,
}

impl Page {
    pub fn new(heading: &'static str) -> Self {
        Self {
            heading,
            notices: Notices::default(),
            forms: Vec::new(),
            tables: Vec::new(),
        }
    }

    pub fn with_form(mut self, form: Form) -> Self {
        self.forms.push(form);
        self
    }

    pub fn with_notices(mut self, notices: Notices) -> Self {
        self.notices.extend(notices);
        self
    }

    pub fn with_table(mut self, table: TableView) -> Self {
        self.tables.push(table);
        self
    }
}

/// Full-page error shown instead of any view.
pub struct Failure {
    pub title: &'static str,
    pub summary: String,
    pub detail: String,
}

/// Per-request rendering state: the runner, this browser's session and the
/// result of the connection probe.
pub struct RenderContext {
    pub runner: QueryRunner,
    pub session: SessionContext,
    pub connection: ConnectionInfo,
}

impl RenderContext {
    /// Probes the database before anything is rendered. A failure here is
    /// fatal for this render and becomes the startup error page.
    pub async fn begin(state: &AppState, session: SessionContext) -> Result<Self, AppError> {
        let connection = state
            .runner
            .probe()
            .await
            .map_err(AppError::ConnectionError)?;

        Ok(Self {
            runner: state.runner.clone(),
            session,
            connection,
        })
    }

    pub fn respond(self, menu: Menu, page: Page) -> Result<Response, AppError> {
        let shell = Shell {
            menu,
            connection: self.connection.label(),
            user_id: self.session.user_id(),
        };
        let body = render_template(|buf| templates::page_html(buf, &shell, &page))?;

        Ok(page_response(StatusCode::OK, body, self.session.cookie()))
    }
}

/// Menu router: one label, one view.
pub async fn render(menu: Menu, ctx: &RenderContext) -> Page {
    match menu {
        Menu::Login => login::render(ctx),
        Menu::Events => entity::render::<events::EventsView>(ctx).await,
        Menu::Attendees => entity::render::<attendees::AttendeesView>(ctx).await,
        Menu::Vendors => entity::render::<vendors::VendorsView>(ctx).await,
        Menu::Sponsors => entity::render::<sponsors::SponsorsView>(ctx).await,
        Menu::Summary => summary::render(),
    }
}
