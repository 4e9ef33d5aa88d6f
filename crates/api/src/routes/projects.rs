//! Route definitions for the `/projects` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /          -> one-shot normalized list (public)
/// POST   /          -> create (admin, multipart form + image)
/// GET    /feed      -> live feed snapshot (public)
/// GET    /{id}      -> single project (public)
/// DELETE /{id}      -> delete (admin, requires ?confirm=true)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route("/feed", get(projects::feed))
        .route("/{id}", get(projects::get).delete(projects::delete))
}
