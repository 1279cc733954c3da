//! The shared shape of the four record views: a form, one INSERT per
//! submission, and the full listing underneath.

use tracing::info;

use super::{Field, Form, Menu, Page, RenderContext, TableView};
use crate::db::Query;
use crate::models::Insertable;
use crate::utils::response::Notices;

pub trait EntityView: Send + Sync + 'static {
    type Input: Insertable;

    const MENU: Menu;
    const HEADING: &'static str;
    const ACTION: &'static str;
    const SUBMIT_LABEL: &'static str;
    const SUCCESS: &'static str;
    const EMPTY: &'static str;

    fn fields() -> Vec<Field>;

    fn form() -> Form {
        Form {
            action: Self::ACTION,
            submit_label: Self::SUBMIT_LABEL,
            fields: Self::fields(),
        }
    }
}

pub async fn render<V: EntityView>(ctx: &RenderContext) -> Page {
    page::<V>(ctx, Notices::default(), Vec::new()).await
}

pub async fn submit<V: EntityView>(ctx: &RenderContext, input: V::Input) -> Page {
    let mut notices = Notices::default();
    let submitted = input.form_values();

    match input.into_insert(ctx.session.user_id()) {
        Ok(insert) => {
            if ctx.runner.execute(&insert, &mut notices).await {
                info!(view = V::HEADING, "Record inserted");
                notices.success(V::SUCCESS);
            }
        }
        Err(err) => notices.error(err.to_string()),
    }

    page::<V>(ctx, notices, submitted).await
}

async fn page<V: EntityView>(
    ctx: &RenderContext,
    mut notices: Notices,
    submitted: Vec<(&'static str, String)>,
) -> Page {
    let listing = ctx
        .runner
        .fetch(&Query::new(<V::Input as Insertable>::LISTING), &mut notices)
        .await;

    let page = Page::new(V::HEADING)
        .with_form(V::form().fill(submitted))
        .with_notices(notices);

    match listing {
        Some(table) => page.with_table(TableView::from_table(&table, Some(V::EMPTY))),
        None => page,
    }
}
