//! Routes for the session gate.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Mounted at `/auth`. Login and refresh are necessarily public; logout
/// needs a valid access token.
///
/// ```text
/// POST /login
/// POST /refresh
/// POST /logout   (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
}
