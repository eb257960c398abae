use axum::routing::get;
use axum::Router;

use crate::handlers::instructor;
use crate::state::AppState;

/// Routes mounted at `/instructor` (the calling instructor).
pub fn own_router() -> Router<AppState> {
    Router::new().route("/courses", get(instructor::my_courses))
}

/// Routes mounted at `/instructors` (public profiles).
pub fn public_router() -> Router<AppState> {
    Router::new().route("/{id}", get(instructor::profile))
}
