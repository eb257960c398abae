//! Handlers for the `/courses` resource: catalog reads, creation, the
//! landing-page step, publication and deletion.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use lectern_core::course::{
    ensure_publishable, validate_for_status, CreateCourseInput, LandingPageUpdate,
};
use lectern_core::curriculum::normalize_curriculum;
use lectern_core::error::CoreError;
use lectern_core::policy::CourseAction;
use lectern_core::types::DbId;
use lectern_core::workflow::{CompletedSteps, CourseStatus, WorkflowStep};
use lectern_db::models::course::{Course, CourseFilter, CourseSummary, NewCourse};
use lectern_db::repositories::CourseRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::{ensure_category_exists, load_authorized, stale_write};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::rbac::RequireInstructor;
use crate::response::DataResponse;
use crate::state::AppState;

fn gone(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Course",
        id,
    })
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// GET /api/v1/courses
///
/// Published courses only. Supports `category`, `level`, `language`,
/// `search`, `limit` and `offset`.
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<CourseFilter>,
) -> AppResult<Json<DataResponse<Vec<CourseSummary>>>> {
    let courses = CourseRepo::list_published(&state.pool, &filter).await?;
    Ok(Json(DataResponse::new(courses)))
}

/// GET /api/v1/courses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Course>>> {
    let actor = user.actor();
    let (course, _) = load_authorized(&state, id, actor.as_ref(), CourseAction::View).await?;
    Ok(Json(DataResponse::new(course)))
}

// ---------------------------------------------------------------------------
// Authoring
// ---------------------------------------------------------------------------

/// POST /api/v1/courses
///
/// Creates a draft from as little as a title. With `"status": "published"`
/// the course must pass publish validation and is created with every
/// workflow step recorded.
pub async fn create(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCourseInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Course>>)> {
    let CreateCourseInput {
        mut landing_page,
        status,
        sections,
    } = input;
    landing_page.normalize();
    let sections = normalize_curriculum(sections)?;
    validate_for_status(&landing_page, &sections, status)?;
    ensure_category_exists(&state, landing_page.category_id).await?;

    let mut steps = CompletedSteps::new();
    steps.insert(WorkflowStep::LandingPage);
    if !sections.is_empty() {
        steps.insert(WorkflowStep::Curriculum);
    }
    if status == CourseStatus::Published {
        for step in WorkflowStep::ALL {
            steps.insert(step);
        }
    }

    let course = CourseRepo::create(
        &state.pool,
        &NewCourse {
            instructor_id: user.user_id,
            landing_page,
            status,
            completed_steps: steps,
            sections,
        },
    )
    .await?;

    tracing::info!(
        course_id = course.id,
        instructor_id = user.user_id,
        status = %course.status,
        "Course created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(course))))
}

/// PUT /api/v1/courses/{id}/landing-page
///
/// Partial update of the descriptive fields. A published course must still
/// pass publish validation afterwards.
pub async fn update_landing_page(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(update): AppJson<LandingPageUpdate>,
) -> AppResult<Json<DataResponse<Course>>> {
    let actor = user.actor();
    let (course, _) = load_authorized(&state, id, Some(&actor), CourseAction::Edit).await?;

    let mut page = course.landing_page();
    page.apply(update);
    page.normalize();
    validate_for_status(&page, &course.sections.0, course.course_status())?;
    ensure_category_exists(&state, page.category_id).await?;

    let mut steps = course.workflow_steps();
    steps.insert(WorkflowStep::LandingPage);

    let updated = CourseRepo::update_landing_page(&state.pool, id, course.revision, &page, &steps)
        .await?
        .ok_or_else(|| stale_write(id))?;
    Ok(Json(DataResponse::new(updated)))
}

/// POST /api/v1/courses/{id}/publish
///
/// Every violated publish rule is reported at once.
pub async fn publish(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Course>>> {
    let actor = user.actor();
    let (course, _) = load_authorized(&state, id, Some(&actor), CourseAction::Edit).await?;

    ensure_publishable(&course.landing_page(), &course.sections.0)?;

    let mut steps = course.workflow_steps();
    steps.insert(WorkflowStep::Publish);

    let updated = CourseRepo::set_publication(
        &state.pool,
        id,
        course.revision,
        CourseStatus::Published,
        &steps,
    )
    .await?
    .ok_or_else(|| stale_write(id))?;
    tracing::info!(course_id = id, user_id = user.user_id, "Course published");
    Ok(Json(DataResponse::new(updated)))
}

/// POST /api/v1/courses/{id}/unpublish
///
/// Back to draft. Landing page, curriculum, notes and ratings are untouched.
pub async fn unpublish(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Course>>> {
    let actor = user.actor();
    let (course, _) = load_authorized(&state, id, Some(&actor), CourseAction::Edit).await?;

    let mut steps = course.workflow_steps();
    steps.remove(WorkflowStep::Publish);

    let updated =
        CourseRepo::set_publication(&state.pool, id, course.revision, CourseStatus::Draft, &steps)
            .await?
            .ok_or_else(|| stale_write(id))?;
    tracing::info!(course_id = id, user_id = user.user_id, "Course unpublished");
    Ok(Json(DataResponse::new(updated)))
}

/// DELETE /api/v1/courses/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let actor = user.actor();
    load_authorized(&state, id, Some(&actor), CourseAction::Edit).await?;

    if !CourseRepo::delete(&state.pool, id).await? {
        return Err(gone(id));
    }
    tracing::info!(course_id = id, user_id = user.user_id, "Course deleted");
    Ok(StatusCode::NO_CONTENT)
}
