//! Login is a single call to `check_login_credentials`, which returns the
//! user id or 0. Nothing is hashed or compared on this side.

use tracing::{info, warn};

use crate::db::{Cell, QueryRunner};
use crate::models::Credentials;
use crate::session::SessionContext;
use crate::utils::response::Notices;

pub const LOGIN_ERROR: &str = "Login error:";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials (function returned 0).";

/// Returns the authenticated user id, if the database accepted the login.
pub async fn login(
    runner: &QueryRunner,
    session: &mut SessionContext,
    credentials: Credentials,
    notices: &mut Notices,
) -> Option<i64> {
    let check = credentials.into_check();
    let table = runner.fetch_reporting(&check, LOGIN_ERROR, notices).await?;

    match table.scalar().and_then(Cell::as_i64) {
        Some(user_id) if user_id > 0 => {
            session.sign_in(user_id).await;
            notices.success(format!("Logged in as user_id={user_id}"));
            Some(user_id)
        }
        _ => {
            warn!(session_id = %session.id(), "Login rejected by database");
            notices.error(INVALID_CREDENTIALS);
            None
        }
    }
}

pub async fn logout(session: &mut SessionContext, notices: &mut Notices) {
    session.sign_out().await;
    info!(session_id = %session.id(), "Logout");
    notices.success("Logged out");
}
