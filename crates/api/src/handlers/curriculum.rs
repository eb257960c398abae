//! Handlers for `/courses/{id}/curriculum`.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::Json;
use lectern_core::course::ensure_publishable;
use lectern_core::curriculum::{
    curriculum_view, normalize_curriculum, ContentType, Section, SectionInput, SectionView,
};
use lectern_core::policy::{content_access, CourseAction};
use lectern_core::types::DbId;
use lectern_core::workflow::{CourseStatus, WorkflowStep};
use lectern_db::models::course::Course;
use lectern_db::repositories::CourseRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::{load_authorized, stale_write};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /courses/{id}/curriculum`.
#[derive(Debug, Deserialize)]
pub struct ReplaceCurriculum {
    pub sections: Vec<SectionInput>,
}

/// The stored curriculum with its course-level aggregates.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumResponse {
    pub course_id: DbId,
    pub sections: Vec<Section>,
    pub total_duration: i64,
    pub total_lectures: i32,
    pub content_counts: BTreeMap<ContentType, i32>,
    pub completed_steps: Vec<String>,
}

impl From<Course> for CurriculumResponse {
    fn from(course: Course) -> Self {
        Self {
            course_id: course.id,
            sections: course.sections.0,
            total_duration: course.total_duration,
            total_lectures: course.total_lectures,
            content_counts: course.content_counts.0,
            completed_steps: course.completed_steps,
        }
    }
}

/// The curriculum as a particular caller may see it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumView {
    pub course_id: DbId,
    pub sections: Vec<SectionView>,
    pub total_duration: i64,
    pub total_lectures: i32,
    pub content_counts: BTreeMap<ContentType, i32>,
}

/// GET /api/v1/courses/{id}/curriculum
///
/// Visitors see preview items in full and every other item locked, without
/// payload, resources or notes.
pub async fn get(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CurriculumView>>> {
    let actor = user.actor();
    let (course, scope) = load_authorized(&state, id, actor.as_ref(), CourseAction::View).await?;
    let access = content_access(actor.as_ref(), &scope);

    Ok(Json(DataResponse::new(CurriculumView {
        course_id: course.id,
        sections: curriculum_view(&course.sections.0, access),
        total_duration: course.total_duration,
        total_lectures: course.total_lectures,
        content_counts: course.content_counts.0,
    })))
}

/// PUT /api/v1/courses/{id}/curriculum
///
/// Replaces the whole section tree. Sort orders are renumbered from array
/// position, only the payload matching each item's type is kept, and the
/// aggregates are recomputed. Requires the landing-page step.
pub async fn replace(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<ReplaceCurriculum>,
) -> AppResult<Json<DataResponse<CurriculumResponse>>> {
    let actor = user.actor();
    let (course, _) = load_authorized(&state, id, Some(&actor), CourseAction::Edit).await?;

    let mut steps = course.workflow_steps();
    steps.ensure_can_enter(WorkflowStep::Curriculum)?;

    let sections = normalize_curriculum(input.sections)?;
    if course.course_status() == CourseStatus::Published {
        ensure_publishable(&course.landing_page(), &sections)?;
    }
    steps.insert(WorkflowStep::Curriculum);

    let updated =
        CourseRepo::replace_curriculum(&state.pool, id, course.revision, &sections, &steps)
            .await?
            .ok_or_else(|| stale_write(id))?;

    tracing::info!(
        course_id = id,
        user_id = user.user_id,
        sections = updated.sections.0.len(),
        total_lectures = updated.total_lectures,
        "Curriculum replaced"
    );
    Ok(Json(DataResponse::new(updated.into())))
}
