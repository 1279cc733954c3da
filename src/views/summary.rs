use super::{Field, Form, Page, RenderContext, TableView};
use crate::models::SummaryRequest;
use crate::utils::response::Notices;

pub const HEADING: &str = "Event Summary (stored procedure)";
pub const CALL_ERROR: &str = "Error calling stored procedure:";

fn form() -> Form {
    Form {
        action: "/summary",
        submit_label: "Get Summary",
        fields: vec![Field::event_id("event_id")],
    }
}

pub fn render() -> Page {
    Page::new(HEADING).with_form(form())
}

/// Every result set becomes its own table, rows or not.
pub async fn submit(ctx: &RenderContext, request: SummaryRequest) -> Page {
    let mut notices = Notices::default();
    let mut page = render();

    match request.into_call() {
        Ok(call) => {
            if let Some(sets) = ctx.runner.call(&call, CALL_ERROR, &mut notices).await {
                for (index, set) in sets.iter().enumerate() {
                    let caption = format!("Result set {}", index + 1);
                    page = page.with_table(TableView::from_table(set, None).with_caption(caption));
                }
            }
        }
        Err(err) => notices.error(err.to_string()),
    }

    page.with_notices(notices)
}
