use std::any::Any;

use axum::response::{IntoResponse, Response};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::config::create_security_headers_layer;
use crate::handlers;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::views::attendees::AttendeesView;
use crate::views::events::EventsView;
use crate::views::sponsors::SponsorsView;
use crate::views::vendors::VendorsView;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::show))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/events", post(handlers::create::<EventsView>))
        .route("/attendees", post(handlers::create::<AttendeesView>))
        .route("/vendors", post(handlers::create::<VendorsView>))
        .route("/sponsors", post(handlers::create::<SponsorsView>))
        .route("/summary", post(handlers::event_summary))
        .route("/static/:name", get(handlers::static_file))
        .route("/health", get(handlers::health_check))
        .with_state(state)
        .layer(CatchPanicLayer::custom(render_panic))
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer())
}

/// A panicking view still produces a page instead of a dropped connection.
fn render_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::InternalServerError(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::db::memory::{MemoryBackend, SEED_EMAIL, SEED_PASSWORD};
    use crate::session::SESSION_COOKIE;

    fn app_with(backend: MemoryBackend) -> Router {
        create_routes(AppState::new(Arc::new(backend)))
    }

    fn app() -> Router {
        app_with(MemoryBackend::seeded())
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_page(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    /// `name=value` pair from the response's Set-Cookie header.
    fn session_cookie(response: &Response) -> String {
        let raw = response.headers()[header::SET_COOKIE].to_str().unwrap();
        raw.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = app().oneshot(get_page("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let payload: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["database"], "connected");
    }

    #[tokio::test]
    async fn test_default_page_is_login_with_session_cookie() {
        let response = app().oneshot(get_page("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(session_cookie(&response).starts_with(SESSION_COOKIE));
        let body = body_text(response).await;
        assert!(body.contains("Connected to event5@memory"));
        assert!(body.contains("Not logged in"));
        assert!(body.contains("action=\"/login\""));
    }

    #[tokio::test]
    async fn test_anonymous_page_views_keep_no_sessions() {
        let state = AppState::new(Arc::new(MemoryBackend::seeded()));
        let app = create_routes(state.clone());

        for _ in 0..20 {
            let response = app.clone().oneshot(get_page("/?menu=Events")).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
        assert_eq!(state.sessions.len().await, 0);

        app.oneshot(post_form(
            "/login",
            &format!("email={}&password={}", SEED_EMAIL.replace('@', "%40"), SEED_PASSWORD),
            None,
        ))
        .await
        .unwrap();
        assert_eq!(state.sessions.len().await, 1);
    }

    #[tokio::test]
    async fn test_menu_selects_view() {
        let response = app()
            .oneshot(get_page("/?menu=Event+Summary"))
            .await
            .unwrap();
        let body = body_text(response).await;
        assert!(body.contains("Event Summary (stored procedure)"));
        assert!(body.contains("Get Summary"));
    }

    #[tokio::test]
    async fn test_events_listing_shows_seeded_event() {
        let response = app().oneshot(get_page("/?menu=Events")).await.unwrap();
        let body = body_text(response).await;
        assert!(body.contains("Launch party"));
        assert!(body.contains("<th>title</th>"));
    }

    #[tokio::test]
    async fn test_empty_listing_shows_empty_state() {
        let response = app().oneshot(get_page("/?menu=Sponsors")).await.unwrap();
        assert!(body_text(response).await.contains("No sponsors yet."));
    }

    #[tokio::test]
    async fn test_event_creation_requires_login() {
        let app = app();
        let response = app
            .clone()
            .oneshot(post_form("/events", "title=Secret+Gala&location=Roof", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("You must login first."));
        assert!(!body.contains("Secret Gala"));
    }

    #[tokio::test]
    async fn test_login_then_create_event() {
        let app = app();

        let login = app
            .clone()
            .oneshot(post_form(
                "/login",
                &format!("email={}&password={}", SEED_EMAIL.replace('@', "%40"), SEED_PASSWORD),
                None,
            ))
            .await
            .unwrap();
        let cookie = session_cookie(&login);
        let body = body_text(login).await;
        assert!(body.contains("Logged in as user_id=1"));
        assert!(body.contains("action=\"/logout\""));

        let create = app
            .clone()
            .oneshot(post_form(
                "/events",
                "title=Winter+Gala&description=Formal&location=Ballroom&start_time=2025-12-01+19%3A00%3A00&end_time=2025-12-01+23%3A00%3A00",
                Some(&cookie),
            ))
            .await
            .unwrap();
        let body = body_text(create).await;
        assert!(body.contains("Event inserted (triggers run on DB)."));
        assert!(body.contains("Winter Gala"));
        assert!(body.contains("Launch party"));
    }

    #[tokio::test]
    async fn test_invalid_login_is_reported() {
        let response = app()
            .oneshot(post_form("/login", "email=nobody%40example.com&password=x", None))
            .await
            .unwrap();
        let body = body_text(response).await;
        assert!(body.contains("Invalid credentials (function returned 0)."));
        assert!(body.contains("Not logged in"));
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let app = app();
        let login = app
            .clone()
            .oneshot(post_form(
                "/login",
                &format!("email={}&password={}", SEED_EMAIL.replace('@', "%40"), SEED_PASSWORD),
                None,
            ))
            .await
            .unwrap();
        let cookie = session_cookie(&login);

        let logout = app
            .clone()
            .oneshot(post_form("/logout", "", Some(&cookie)))
            .await
            .unwrap();
        let body = body_text(logout).await;
        assert!(body.contains("Logged out"));
        assert!(body.contains("Not logged in"));

        let create = app
            .oneshot(post_form("/events", "title=After", Some(&cookie)))
            .await
            .unwrap();
        assert!(body_text(create).await.contains("You must login first."));
    }

    #[tokio::test]
    async fn test_attendee_insert_without_login() {
        let app = app();
        let response = app
            .clone()
            .oneshot(post_form("/attendees", "event_id=1&email=guest%40example.com", None))
            .await
            .unwrap();
        let body = body_text(response).await;
        assert!(body.contains("Attendee inserted."));
        assert!(body.contains("guest@example.com"));
    }

    #[tokio::test]
    async fn test_foreign_key_violation_keeps_view_usable() {
        let app = app();
        let response = app
            .clone()
            .oneshot(post_form("/vendors", "event_id=42&name=Ghost&service=None&amount_to_be_paid=10", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("MySQL Error:"));
        assert!(body.contains("foreign key constraint fails"));
        assert!(!body.contains("Vendor added."));
        assert!(body.contains("Add Vendor"));
        assert!(body.contains("No vendors yet."));
        assert!(body.contains("value=\"Ghost\""));
        assert!(body.contains("value=\"42\""));

        let retry = app
            .oneshot(post_form("/vendors", "event_id=1&name=Sound+Co&service=PA&amount_to_be_paid=250.00", None))
            .await
            .unwrap();
        let body = body_text(retry).await;
        assert!(body.contains("Vendor added."));
        assert!(body.contains("Sound Co"));
    }

    #[tokio::test]
    async fn test_out_of_bound_amount_is_rejected() {
        let response = app()
            .oneshot(post_form("/sponsors", "event_id=1&name=Acme&level=Gold&contribution=-1", None))
            .await
            .unwrap();
        let body = body_text(response).await;
        assert!(body.contains("Contribution must be a number of at least 0."));
        assert!(body.contains("No sponsors yet."));
    }

    #[tokio::test]
    async fn test_summary_for_event_without_records() {
        let response = app()
            .oneshot(post_form("/summary", "event_id=77", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Result set 1"));
        assert!(body.contains("<table"));
        assert!(!body.contains("Error calling stored procedure:"));
    }

    #[tokio::test]
    async fn test_summary_renders_each_result_set() {
        let app = app();
        app.clone()
            .oneshot(post_form("/sponsors", "event_id=1&name=Acme&level=Gold&contribution=500", None))
            .await
            .unwrap();

        let response = app
            .oneshot(post_form("/summary", "event_id=1", None))
            .await
            .unwrap();
        let body = body_text(response).await;
        assert!(body.contains("Result set 1"));
        assert!(body.contains("Result set 2"));
        assert!(body.contains("sponsor_total"));
        assert!(body.contains("500"));
    }

    #[tokio::test]
    async fn test_unreachable_database_shows_startup_error() {
        let backend = MemoryBackend::seeded();
        backend.set_offline(true);

        let response = app_with(backend).oneshot(get_page("/?menu=Events")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_text(response).await;
        assert!(body.contains("App failed to start"));
        assert!(body.contains("PoolTimedOut"));
        assert!(!body.contains("Add Event"));
    }

    #[tokio::test]
    async fn test_static_stylesheet_is_served() {
        use crate::templates::statics::console_css;

        let response = app()
            .oneshot(get_page(&format!("/static/{}", console_css.name)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let missing = app().oneshot(get_page("/static/nope.css")).await.unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_panic_payload_becomes_error_page() {
        let response = render_panic(Box::new("view exploded"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
