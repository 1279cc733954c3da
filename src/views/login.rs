use super::{Field, Form, Page, RenderContext};
use crate::auth;
use crate::models::Credentials;
use crate::utils::response::Notices;

pub const HEADING: &str = "Login";

fn form() -> Form {
    Form {
        action: "/login",
        submit_label: "Login",
        fields: vec![
            Field::text("email", "Email"),
            Field::password("password", "Password"),
        ],
    }
}

pub fn render(ctx: &RenderContext) -> Page {
    let mut notices = Notices::default();
    if let Some(user_id) = ctx.session.user_id() {
        notices.info(format!("Logged in as user_id = {user_id}"));
    }
    Page::new(HEADING).with_form(form()).with_notices(notices)
}

pub async fn submit(ctx: &mut RenderContext, credentials: Credentials) -> Page {
    let mut notices = Notices::default();
    auth::login(&ctx.runner, &mut ctx.session, credentials, &mut notices).await;
    Page::new(HEADING).with_form(form()).with_notices(notices)
}

pub async fn logout(ctx: &mut RenderContext) -> Page {
    let mut notices = Notices::default();
    auth::logout(&mut ctx.session, &mut notices).await;
    Page::new(HEADING).with_form(form()).with_notices(notices)
}
