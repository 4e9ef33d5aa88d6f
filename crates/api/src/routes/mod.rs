pub mod auth;
pub mod health;
pub mod projects;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                      live updates WebSocket
///
/// /auth/login              login (public)
/// /auth/refresh            refresh (public)
/// /auth/logout             logout (requires auth)
///
/// /projects                list (GET), create (POST, admin, multipart)
/// /projects/feed           live feed snapshot (GET)
/// /projects/{id}           get (GET), delete (DELETE, admin, ?confirm=true)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Live updates WebSocket.
        .route("/ws", get(ws::ws_handler))
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Project routes.
        .nest("/projects", projects::router())
}
