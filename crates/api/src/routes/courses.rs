//! Route definitions for the `/courses` resource and everything scoped to a
//! single course.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{course, curriculum, engagement, notes};
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// DELETE /{id}                      -> delete
/// PUT    /{id}/landing-page         -> update_landing_page
/// GET    /{id}/curriculum           -> curriculum::get
/// PUT    /{id}/curriculum           -> curriculum::replace
/// POST   /{id}/publish              -> publish
/// POST   /{id}/unpublish            -> unpublish
/// POST   /{id}/enroll               -> enroll
/// PUT    /{id}/progress             -> update_progress
/// POST   /{id}/wishlist             -> add_to_wishlist
/// DELETE /{id}/wishlist             -> remove_from_wishlist
/// POST   /{id}/rate                 -> rate
/// GET    /{id}/ratings              -> list_ratings
/// GET    /{id}/notes                -> notes::list
/// POST   /{id}/notes                -> notes::add
/// DELETE /{id}/notes/{note_id}      -> notes::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(course::list).post(course::create))
        .route("/{id}", get(course::get_by_id).delete(course::delete))
        .route("/{id}/landing-page", put(course::update_landing_page))
        .route(
            "/{id}/curriculum",
            get(curriculum::get).put(curriculum::replace),
        )
        .route("/{id}/publish", post(course::publish))
        .route("/{id}/unpublish", post(course::unpublish))
        .route("/{id}/enroll", post(engagement::enroll))
        .route("/{id}/progress", put(engagement::update_progress))
        .route(
            "/{id}/wishlist",
            post(engagement::add_to_wishlist).delete(engagement::remove_from_wishlist),
        )
        .route("/{id}/rate", post(engagement::rate))
        .route("/{id}/ratings", get(engagement::list_ratings))
        .route("/{id}/notes", get(notes::list).post(notes::add))
        .route("/{id}/notes/{note_id}", delete(notes::delete))
}
