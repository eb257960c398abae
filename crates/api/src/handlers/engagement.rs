//! Student engagement: enrollment, progress, wishlist and ratings.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use lectern_core::enrollment::validate_progress;
use lectern_core::error::CoreError;
use lectern_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use lectern_core::policy::CourseAction;
use lectern_core::rating::{validate_rating_value, RatingAggregate};
use lectern_core::types::DbId;
use lectern_db::models::enrollment::{EnrolledCourse, Enrollment, UpdateProgress};
use lectern_db::models::rating::{RateCourse, RatingWithUser};
use lectern_db::models::wishlist::WishlistEntry;
use lectern_db::repositories::{EnrollmentRepo, RatingRepo, WishlistRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::load_authorized;
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireStudent;
use crate::response::DataResponse;
use crate::state::AppState;

/// Longest accepted rating comment, in characters.
const MAX_COMMENT_CHARS: usize = 2000;

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Enrollment
// ---------------------------------------------------------------------------

/// POST /api/v1/courses/{id}/enroll
pub async fn enroll(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<Enrollment>>)> {
    let actor = user.actor();
    load_authorized(&state, id, Some(&actor), CourseAction::Enroll).await?;

    let enrollment = EnrollmentRepo::enroll(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict("Already enrolled in this course".into()))
        })?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(enrollment))))
}

/// GET /api/v1/me/enrollments
pub async fn my_enrollments(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<EnrolledCourse>>>> {
    let enrollments = EnrollmentRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse::new(enrollments)))
}

/// PUT /api/v1/courses/{id}/progress
pub async fn update_progress(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateProgress>,
) -> AppResult<Json<DataResponse<Enrollment>>> {
    validate_progress(input.progress)?;
    let actor = user.actor();
    load_authorized(&state, id, Some(&actor), CourseAction::TrackProgress).await?;

    let enrollment = EnrollmentRepo::update_progress(&state.pool, id, user.user_id, input.progress)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "You must be enrolled in this course".into(),
            ))
        })?;
    Ok(Json(DataResponse::new(enrollment)))
}

// ---------------------------------------------------------------------------
// Wishlist
// ---------------------------------------------------------------------------

/// POST /api/v1/courses/{id}/wishlist
///
/// Idempotent: adding a course twice keeps one entry.
pub async fn add_to_wishlist(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let actor = user.actor();
    load_authorized(&state, id, Some(&actor), CourseAction::View).await?;

    let added = WishlistRepo::add(&state.pool, user.user_id, id).await?;
    Ok(if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    })
}

/// DELETE /api/v1/courses/{id}/wishlist
pub async fn remove_from_wishlist(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if WishlistRepo::remove(&state.pool, user.user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Course {id} is not on your wishlist")))
    }
}

/// GET /api/v1/me/wishlist
pub async fn my_wishlist(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<WishlistEntry>>>> {
    let entries = WishlistRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse::new(entries)))
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

/// POST /api/v1/courses/{id}/rate
///
/// Creates or replaces the caller's rating and returns the new course
/// aggregate.
pub async fn rate(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<RateCourse>,
) -> AppResult<Json<DataResponse<RatingAggregate>>> {
    validate_rating_value(input.value)?;
    let comment = input
        .comment
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    if comment.is_some_and(|c| c.chars().count() > MAX_COMMENT_CHARS) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Comment must be at most {MAX_COMMENT_CHARS} characters"
        ))));
    }

    let actor = user.actor();
    load_authorized(&state, id, Some(&actor), CourseAction::Rate).await?;

    let aggregate = RatingRepo::upsert(&state.pool, id, user.user_id, input.value, comment)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;
    Ok(Json(DataResponse::new(aggregate)))
}

/// GET /api/v1/courses/{id}/ratings
pub async fn list_ratings(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Path(id): Path<DbId>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<DataResponse<Vec<RatingWithUser>>>> {
    let actor = user.actor();
    load_authorized(&state, id, actor.as_ref(), CourseAction::View).await?;

    let limit = clamp_limit(page.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(page.offset);
    let ratings = RatingRepo::list_for_course(&state.pool, id, limit, offset).await?;
    Ok(Json(DataResponse::new(ratings)))
}
