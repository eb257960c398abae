use axum::routing::get;
use axum::Router;

use crate::handlers::engagement;
use crate::state::AppState;

/// Routes mounted at `/me` (the calling student).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/enrollments", get(engagement::my_enrollments))
        .route("/wishlist", get(engagement::my_wishlist))
}
