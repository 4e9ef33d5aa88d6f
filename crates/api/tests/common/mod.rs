use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use folio_api::auth::jwt::{generate_access_token, JwtConfig};
use folio_api::auth::password::hash_password;
use folio_api::config::ServerConfig;
use folio_api::routes;
use folio_api::state::AppState;
use folio_api::ws::WsManager;
use folio_core::roles::ROLE_ADMIN;
use folio_db::models::user::CreateUser;
use folio_db::repositories::UserRepo;
use folio_db::DbPool;
use folio_events::{EventBus, FeedHandle, ProjectFeed};
use folio_storage::LocalObjectStore;

/// Multipart boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "test-boundary-7cf1a9";

/// Build a test `ServerConfig` with safe defaults and a known JWT secret.
pub fn test_config(upload_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: upload_dir.to_string_lossy().to_string(),
        public_base_url: "http://localhost:3000/uploads".to_string(),
        admin_email: None,
        admin_password: None,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// A fully wired application for integration tests.
///
/// Holds the feed subscription so the background rebuild task stays
/// alive for the duration of the test.
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    _feed: FeedHandle,
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a temp upload directory.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: DbPool, upload_dir: &std::path::Path) -> TestApp {
    let config = test_config(upload_dir);
    let ws_manager = Arc::new(WsManager::new());
    let event_bus = Arc::new(EventBus::default());
    let store = Arc::new(LocalObjectStore::new(
        &config.upload_dir,
        &config.public_base_url,
    ));

    let feed = ProjectFeed::subscribe(pool.clone(), &event_bus);
    let feed_rx = feed.watch();

    let state = AppState {
        pool,
        config: Arc::new(config),
        ws_manager,
        event_bus,
        store,
        feed: feed_rx,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state.clone());

    TestApp {
        app,
        state,
        _feed: feed,
    }
}

/// Create an admin account and return a valid access token for it.
pub async fn admin_token(test_app: &TestApp) -> String {
    let password_hash = hash_password("admin-password").expect("hashing should succeed");
    let user = UserRepo::create(
        &test_app.state.pool,
        &CreateUser {
            email: "admin@example.com".to_string(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await
    .expect("admin creation should succeed");

    generate_access_token(user.id, &user.role, &test_app.state.config.jwt)
        .expect("token generation should succeed")
}

/// Build a multipart/form-data body from text fields plus an optional
/// image part. Returns `(content_type, body_bytes)`.
pub fn multipart_body(
    fields: &[(&str, &str)],
    image: Option<(&str, &[u8])>,
) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((filename, data)) = image {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (
        format!("multipart/form-data; boundary={BOUNDARY}"),
        body,
    )
}

/// Send a request through the router and return `(status, parsed JSON body)`.
///
/// Responses with empty bodies (e.g. 204) yield `Value::Null`.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should not fail at the transport level");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();

    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };

    (status, json)
}

/// GET helper.
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

/// JSON POST helper.
pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

/// Attach a Bearer token to a request builder.
pub fn with_bearer(mut request: Request<Body>, token: &str) -> Request<Body> {
    let value = format!("Bearer {token}")
        .parse()
        .expect("header value should parse");
    request.headers_mut().insert(AUTHORIZATION, value);
    request
}
