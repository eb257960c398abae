pub mod admin;
pub mod auth;
pub mod categories;
pub mod courses;
pub mod health;
pub mod instructors;
pub mod me;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register, /auth/login, /auth/refresh     public
/// /auth/logout, /auth/me                         any user
///
/// /categories                                    list (public), create (admin)
///
/// /courses                                       list (public), create (instructor)
/// /courses/{id}                                  get, delete
/// /courses/{id}/landing-page                     update (owner)
/// /courses/{id}/curriculum                       get (locking per caller), replace (owner)
/// /courses/{id}/publish, /unpublish              owner
/// /courses/{id}/enroll                           student
/// /courses/{id}/progress                         enrolled student
/// /courses/{id}/wishlist                         add, remove (student)
/// /courses/{id}/rate                             enrolled student
/// /courses/{id}/ratings                          public
/// /courses/{id}/notes                            list, add
/// /courses/{id}/notes/{note_id}                  delete
///
/// /instructor/courses                            instructor's own courses
/// /instructors/{id}                              public profile
///
/// /me/enrollments, /me/wishlist                  student
///
/// /admin/users/{id}/deactivate                   admin
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", categories::router())
        .nest("/courses", courses::router())
        .nest("/instructor", instructors::own_router())
        .nest("/instructors", instructors::public_router())
        .nest("/me", me::router())
        .nest("/admin", admin::router())
}
