//! Route definitions.
//!
//! ## Routes
//!
//! - `GET /` - Home page, or the RSVP form when `?event=<id>` is present
//! - `GET /create` - Event creation form
//! - `POST /create` - Create an event, answers `{"eventId": ...}`
//! - `GET /share?event=<id>` - Invite link and embed code
//! - `GET /preview` - Email form, or the creator's events with `?email=`
//! - `GET /preview.json?email=` - Same preview as JSON
//! - `POST /rsvp` - Record a response
//! - `GET /health` - Health check (JSON)
//!
//! Paths match exactly (no trailing-slash normalization). Any other path,
//! or a known path with another method (`HEAD` included), answers
//! `404 Not found` as plain text. A panicking handler is turned into the
//! generic error page.
//!
//! Query parameters select a branch by presence alone; see [`params`].

mod create;
mod event;
mod health;
mod home;
mod params;
mod preview;
mod rsvp;
mod share;

use std::any::Any;

use axum::Router;
use axum::handler::Handler;
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware;
use axum::response::Response;
use axum::routing::{MethodRouter, get, post};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::{self, AppError};
use crate::render::components::CSP_HEADER;
use crate::state::AppState;
use rsvp2go_core::Event;

/// Build the complete rsvp2go router.
pub fn router(state: AppState) -> Router {
    let renderer = state.renderer.clone();

    Router::new()
        .route("/", get_only(home::root))
        .route(
            "/create",
            get_only(create::create_form).post(create::create_event),
        )
        .route("/share", get_only(share::share_page))
        .route("/preview", get_only(preview::preview_page))
        .route("/preview.json", get_only(preview::preview_json))
        .route("/rsvp", post(rsvp::submit_rsvp).fallback(not_found))
        .route("/health", get_only(health::health_check))
        .fallback(not_found)
        .layer(middleware::map_response(security_headers))
        .layer(CatchPanicLayer::custom(
            move |panic: Box<dyn Any + Send + 'static>| error::panic_page(&renderer, panic),
        ))
        .with_state(state)
}

/// `GET` route whose every other method, `HEAD` included, is not found.
fn get_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler).head(not_found).fallback(not_found)
}

/// Answer for every request outside the published surface.
async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Add security headers to every response.
async fn security_headers(response: Response) -> Response {
    let (mut parts, body) = response.into_parts();
    parts.headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    parts.headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CSP_HEADER),
    );
    parts.headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    Response::from_parts(parts, body)
}

/// Look up an event, turning an unknown id into [`AppError::NotFound`].
async fn load_event(state: &AppState, event_id: &str) -> Result<Event, AppError> {
    state
        .events
        .get(event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event {event_id}")))
}

/// A submitted form field that must be present and non-empty.
fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{field} is required")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{HeaderMap, Method, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::render::Theme;
    use rsvp2go_core::{KvStore, ListPage, MemoryKv};

    fn test_config() -> Config {
        Config {
            bind_addr: "127.0.0.1:0".to_string(),
            base_url: "http://rsvp.test".to_string(),
            site_name: "rsvp2go".to_string(),
            redis_url: None,
            redis_namespace: "test".to_string(),
            list_page_size: 2,
            theme: Theme::default(),
        }
    }

    fn app() -> Router {
        router(AppState::with_stores(
            test_config(),
            Arc::new(MemoryKv::new()),
            Arc::new(MemoryKv::new()),
        ))
    }

    /// Backend whose every call fails.
    struct FailingKv;

    #[async_trait]
    impl KvStore for FailingKv {
        async fn get(&self, _key: &str) -> rsvp2go_core::Result<Option<String>> {
            Err(rsvp2go_core::Error::Backend("connection refused 10.1.2.3".into()))
        }

        async fn put(&self, _key: &str, _value: &str) -> rsvp2go_core::Result<()> {
            Err(rsvp2go_core::Error::Backend("connection refused 10.1.2.3".into()))
        }

        async fn put_if_absent(&self, _key: &str, _value: &str) -> rsvp2go_core::Result<bool> {
            Err(rsvp2go_core::Error::Backend("connection refused 10.1.2.3".into()))
        }

        async fn list(
            &self,
            _prefix: &str,
            _cursor: Option<&str>,
            _limit: usize,
        ) -> rsvp2go_core::Result<ListPage> {
            Err(rsvp2go_core::Error::Backend("connection refused 10.1.2.3".into()))
        }
    }

    fn failing_app() -> Router {
        router(AppState::with_stores(
            test_config(),
            Arc::new(FailingKv),
            Arc::new(FailingKv),
        ))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, HeaderMap, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(app, request).await
    }

    async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, HeaderMap, String) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        send(app, request).await
    }

    /// Body and content type of a `multipart/form-data` submission, as a
    /// browser sends `FormData`.
    fn multipart(fields: &[(&str, &str)]) -> (String, &'static str) {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--XX\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str("--XX--\r\n");
        (body, "multipart/form-data; boundary=XX")
    }

    async fn post_multipart(
        app: &Router,
        uri: &str,
        fields: &[(&str, &str)],
    ) -> (StatusCode, HeaderMap, String) {
        let (body, content_type) = multipart(fields);
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        send(app, request).await
    }

    const LAUNCH_PARTY: &str = "name=Launch+Party&date=2024-12-31&timezone=UTC&description=Kickoff&creatorEmail=a%40b.com";

    async fn create_launch_party(app: &Router) -> String {
        let (status, _, body) = post_form(app, "/create", LAUNCH_PARTY).await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        value["eventId"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn home_page() {
        let (status, headers, body) = get(&app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
        assert!(body.contains("Create Event"));
        assert!(body.contains("Preview RSVPs"));
        assert!(body.contains("Free · No personal details · Calendar integration"));
    }

    #[tokio::test]
    async fn create_form_page() {
        let (status, _, body) = get(&app(), "/create").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Create Event"));
        assert!(body.contains("Time Zone"));
        assert!(body.contains("Description"));
    }

    #[tokio::test]
    async fn created_event_renders_rsvp_form() {
        let app = app();
        let event_id = create_launch_party(&app).await;
        assert!(!event_id.is_empty());

        let (status, _, body) = get(&app, &format!("/?event={event_id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Launch Party"));
        assert!(body.contains("UTC"));
        assert!(body.contains("Your Name"));
    }

    #[tokio::test]
    async fn create_returns_json() {
        let (_, headers, _) = post_form(&app(), "/create", LAUNCH_PARTY).await;
        assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("application/json"));
    }

    #[tokio::test]
    async fn create_without_name_is_rejected() {
        let (status, _, body) = post_form(
            &app(),
            "/create",
            "date=2024-12-31&creatorEmail=a%40b.com",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["error"], "invalid_request");
        assert_eq!(value["message"], "name is required");
    }

    #[tokio::test]
    async fn create_without_timezone_or_description_is_accepted() {
        let app = app();
        let (status, _, body) = post_form(
            &app,
            "/create",
            "name=Picnic&date=2025-06-01&timezone=&creatorEmail=a%40b.com",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        let event_id = value["eventId"].as_str().unwrap();

        let (_, _, page) = get(&app, &format!("/?event={event_id}")).await;
        assert!(page.contains("Picnic"));
        assert!(!page.contains("Timezone:"));
    }

    #[tokio::test]
    async fn create_without_form_encoding_is_rejected() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/create")
            .body(Body::from("name=x"))
            .unwrap();
        let (status, _, body) = send(&app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["error"], "invalid_request");
    }

    #[tokio::test]
    async fn rsvp_to_unknown_event_is_recorded() {
        let (status, _, body) =
            post_form(&app(), "/rsvp", "eventId=nope&name=X&email=x%40y.com").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "RSVP recorded");
    }

    #[tokio::test]
    async fn multipart_rsvp_is_recorded() {
        let app = app();
        let event_id = create_launch_party(&app).await;

        let (status, _, body) = post_multipart(
            &app,
            "/rsvp",
            &[
                ("eventId", event_id.as_str()),
                ("name", "Ada"),
                ("email", "ada@example.com"),
            ],
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "RSVP recorded");

        let (_, _, page) = get(&app, "/preview?email=a%40b.com").await;
        assert!(page.contains("ada@example.com"));
    }

    #[tokio::test]
    async fn multipart_create_returns_event_id() {
        let app = app();
        let (status, _, body) = post_multipart(
            &app,
            "/create",
            &[
                ("name", "Launch Party"),
                ("date", "2024-12-31"),
                ("timezone", "UTC"),
                ("description", "Kickoff"),
                ("creatorEmail", "a@b.com"),
            ],
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        let event_id = value["eventId"].as_str().unwrap();

        let (status, _, page) = get(&app, &format!("/?event={event_id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("Launch Party"));
    }

    #[tokio::test]
    async fn multipart_missing_field_is_rejected() {
        let (status, _, body) =
            post_multipart(&app(), "/rsvp", &[("eventId", "abc"), ("name", "X")]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("email is required"));
    }

    #[tokio::test]
    async fn repeated_form_field_uses_first_value() {
        let app = app();
        let (status, _, body) = post_form(
            &app,
            "/create",
            "name=First&name=Second&date=2024-12-31&creatorEmail=a%40b.com",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        let event_id = value["eventId"].as_str().unwrap();

        let (_, _, page) = get(&app, &format!("/?event={event_id}")).await;
        assert!(page.contains("First"));
        assert!(!page.contains("Second"));
    }

    #[tokio::test]
    async fn rsvp_without_email_is_rejected() {
        let (status, _, body) = post_form(&app(), "/rsvp", "eventId=abc&name=X").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("email is required"));
    }

    #[tokio::test]
    async fn preview_lists_new_event_without_rsvps() {
        let app = app();
        let event_id = create_launch_party(&app).await;

        let (status, headers, body) = get(&app, "/preview?email=a@b.com").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
        assert!(body.contains("Launch Party"));
        assert!(body.contains("2024-12-31"));
        assert!(body.contains("No RSVPs"));
        assert!(body.contains(&format!("/share?event={event_id}")));
    }

    #[tokio::test]
    async fn preview_shows_rsvps_and_ignores_case() {
        let app = app();
        let event_id = create_launch_party(&app).await;
        post_form(
            &app,
            "/rsvp",
            &format!("eventId={event_id}&name=Ada&email=ada%40example.com"),
        )
        .await;

        let (_, _, body) = get(&app, "/preview?email=A%40B.COM").await;
        assert!(body.contains("Launch Party"));
        assert!(body.contains("ada@example.com"));
        assert!(!body.contains("No RSVPs"));
    }

    #[tokio::test]
    async fn preview_for_unknown_email_reports_no_events() {
        let app = app();
        create_launch_party(&app).await;

        let (status, _, body) = get(&app, "/preview?email=unknown@z.com").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No events found for unknown@z.com"));
    }

    #[tokio::test]
    async fn preview_without_email_shows_form() {
        let (status, _, body) = get(&app(), "/preview").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Preview Your Events"));
        assert!(body.contains("Enter your email"));
    }

    #[tokio::test]
    async fn preview_with_empty_email_shows_results() {
        let app = app();
        create_launch_party(&app).await;

        let (status, _, body) = get(&app, "/preview?email=").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No events found for"));
        assert!(!body.contains("Enter your email"));
    }

    #[tokio::test]
    async fn preview_json_nests_rsvps() {
        let app = app();
        let event_id = create_launch_party(&app).await;
        post_form(
            &app,
            "/rsvp",
            &format!("eventId={event_id}&name=Ada&email=ada%40example.com"),
        )
        .await;

        let (status, _, body) = get(&app, "/preview.json?email=a%40b.com").await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["email"], "a@b.com");
        assert_eq!(value["count"], 1);
        assert_eq!(value["events"][0]["id"], event_id.as_str());
        assert_eq!(value["events"][0]["creatorEmail"], "a@b.com");
        assert_eq!(value["events"][0]["rsvps"][0]["name"], "Ada");
    }

    #[tokio::test]
    async fn preview_json_with_no_matches_is_empty_not_error() {
        let (status, _, body) = get(&app(), "/preview.json?email=unknown%40z.com").await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["count"], 0);
        assert_eq!(value["events"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn preview_json_requires_email() {
        let (status, _, body) = get(&app(), "/preview.json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("email is required"));
    }

    #[tokio::test]
    async fn missing_event_is_not_found_page() {
        let (status, headers, body) = get(&app(), "/?event=missing-id").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
        assert!(body.contains("Event Not Found"));
        assert!(body.contains("exist or has expired"));
    }

    #[tokio::test]
    async fn repeated_event_parameter_uses_first_value() {
        let app = app();
        let event_id = create_launch_party(&app).await;

        let (status, _, body) = get(&app, &format!("/?event={event_id}&event=other")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Launch Party"));

        let (status, _, body) = get(&app, "/?event=a&event=b").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Event Not Found"));
    }

    #[tokio::test]
    async fn empty_event_parameter_is_not_found_page() {
        let (status, _, body) = get(&app(), "/?event=").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Event Not Found"));
    }

    #[tokio::test]
    async fn share_page_has_embed_code() {
        let app = app();
        let event_id = create_launch_party(&app).await;

        let (status, _, body) = get(&app, &format!("/share?event={event_id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Share Your RSVP Page"));
        assert!(body.contains(&format!("http://rsvp.test/?event={event_id}")));
    }

    #[tokio::test]
    async fn share_for_missing_event_is_not_found_page() {
        let (status, _, body) = get(&app(), "/share?event=missing-id").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Event Not Found"));
    }

    #[tokio::test]
    async fn share_without_event_is_plain_not_found() {
        let (status, _, body) = get(&app(), "/share").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Not found");
    }

    #[tokio::test]
    async fn unknown_route_is_plain_not_found() {
        let (status, headers, body) = get(&app(), "/unknown-route").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Not found");
        assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/plain"));
    }

    #[tokio::test]
    async fn wrong_method_is_plain_not_found() {
        let (status, _, body) = post_form(&app(), "/", "x=1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Not found");

        let (status, _, body) = get(&app(), "/rsvp").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Not found");
    }

    #[tokio::test]
    async fn head_is_not_found() {
        for uri in ["/", "/create", "/preview", "/health"] {
            let request = Request::builder()
                .method(Method::HEAD)
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            let response = app().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "HEAD {uri}");
        }
    }

    #[tokio::test]
    async fn trailing_slash_is_not_normalized() {
        let (status, _, body) = get(&app(), "/create/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Not found");
    }

    #[tokio::test]
    async fn storage_failure_on_html_route_is_generic_page() {
        let (status, headers, body) = get(&failing_app(), "/?event=abc").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
        assert!(body.contains("An internal error occurred"));
        assert!(!body.contains("10.1.2.3"));
    }

    #[tokio::test]
    async fn storage_failure_on_json_route_is_json() {
        let (status, headers, body) = post_form(&failing_app(), "/create", LAUNCH_PARTY).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("application/json"));
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["error"], "storage_error");
        assert!(!body.contains("10.1.2.3"));
    }

    #[tokio::test]
    async fn storage_failure_during_preview_is_error_not_empty() {
        let (status, _, body) = get(&failing_app(), "/preview?email=a@b.com").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("No events found"));
    }

    #[tokio::test]
    async fn home_page_needs_no_storage() {
        let (status, _, _) = get(&failing_app(), "/").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn responses_carry_security_headers() {
        let (_, headers, _) = get(&app(), "/").await;
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert!(headers.contains_key(header::CONTENT_SECURITY_POLICY));
        assert!(!headers.contains_key(header::X_FRAME_OPTIONS));
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (status, _, body) = get(&app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["service"], "rsvp2go");
    }
}
