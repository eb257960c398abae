//! Handlers for course-level notes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use lectern_core::error::CoreError;
use lectern_core::notes::{Note, NoteInput};
use lectern_core::policy::CourseAction;
use lectern_core::types::DbId;
use lectern_db::repositories::CourseRepo;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::load_authorized;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/courses/{id}/notes
///
/// Notes are stored at course level. A requested section/content placement
/// is accepted but only logged.
pub async fn add(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<NoteInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Note>>)> {
    let actor = user.actor();
    load_authorized(&state, id, Some(&actor), CourseAction::Edit).await?;

    if input.targets_content_item() {
        tracing::info!(
            course_id = id,
            section_index = ?input.section_index,
            content_index = ?input.content_index,
            "Per-item note placement requested; storing at course level"
        );
    }

    let note = input.into_note(Uuid::new_v4().to_string(), Utc::now())?;
    CourseRepo::add_note(&state.pool, id, &note)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(note))))
}

/// GET /api/v1/courses/{id}/notes
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Note>>>> {
    let actor = user.actor();
    let (course, _) = load_authorized(&state, id, Some(&actor), CourseAction::ViewNotes).await?;
    Ok(Json(DataResponse::new(course.notes.0)))
}

/// DELETE /api/v1/courses/{id}/notes/{note_id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path((id, note_id)): Path<(DbId, String)>,
) -> AppResult<StatusCode> {
    let actor = user.actor();
    load_authorized(&state, id, Some(&actor), CourseAction::Edit).await?;

    if CourseRepo::remove_note(&state.pool, id, &note_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Note {note_id} not found")))
    }
}
