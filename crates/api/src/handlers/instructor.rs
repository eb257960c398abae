//! Instructor dashboards and public profiles.

use axum::extract::{Path, State};
use axum::Json;
use lectern_core::error::CoreError;
use lectern_core::types::DbId;
use lectern_db::models::course::CourseSummary;
use lectern_db::models::user::InstructorProfile;
use lectern_db::repositories::{CourseRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireInstructor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/instructor/courses
///
/// All of the caller's courses, drafts included.
pub async fn my_courses(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CourseSummary>>>> {
    let courses = CourseRepo::list_by_instructor(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse::new(courses)))
}

/// GET /api/v1/instructors/{id}
pub async fn profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<InstructorProfile>>> {
    let profile = UserRepo::instructor_profile(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Instructor",
            id,
        }))?;
    Ok(Json(DataResponse::new(profile)))
}
