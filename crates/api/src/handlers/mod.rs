pub mod admin;
pub mod auth;
pub mod category;
pub mod course;
pub mod curriculum;
pub mod engagement;
pub mod instructor;
pub mod notes;

use lectern_core::error::CoreError;
use lectern_core::policy::{authorize, Actor, CourseAction, CourseScope};
use lectern_core::types::DbId;
use lectern_db::models::course::Course;
use lectern_db::repositories::{CategoryRepo, CourseRepo, EnrollmentRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Load a course or fail with 404.
pub(crate) async fn find_course(state: &AppState, id: DbId) -> AppResult<Course> {
    CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))
}

/// Load a course and check that `actor` may perform `action` on it.
///
/// Enrollment is only looked up for students, the only role that enrolls.
pub(crate) async fn load_authorized(
    state: &AppState,
    id: DbId,
    actor: Option<&Actor<'_>>,
    action: CourseAction,
) -> AppResult<(Course, CourseScope)> {
    let course = find_course(state, id).await?;
    let enrolled = match actor {
        Some(a) if a.is_student() => {
            EnrollmentRepo::is_enrolled(&state.pool, course.id, a.user_id).await?
        }
        _ => false,
    };
    let scope = course.scope(enrolled);
    authorize(actor, action, &scope)?;
    Ok((course, scope))
}

/// A guarded write matched no row: the course was deleted or changed after
/// it was loaded and validated.
pub(crate) fn stale_write(id: DbId) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Course {id} was modified concurrently; reload and retry"
    )))
}

/// Reject a category id that does not exist.
pub(crate) async fn ensure_category_exists(
    state: &AppState,
    category_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(id) = category_id {
        if CategoryRepo::find_by_id(&state.pool, id).await?.is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Category {id} does not exist"
            ))));
        }
    }
    Ok(())
}
