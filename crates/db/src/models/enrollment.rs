//! Enrollment models.

use lectern_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `enrollments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: DbId,
    pub course_id: DbId,
    pub user_id: DbId,
    pub progress: i16,
    pub is_active: bool,
    pub enrolled_at: Timestamp,
    pub last_accessed_at: Timestamp,
}

/// An enrollment joined with the course fields shown on "my learning".
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourse {
    pub course_id: DbId,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub instructor_id: DbId,
    pub progress: i16,
    pub enrolled_at: Timestamp,
    pub last_accessed_at: Timestamp,
}

/// Request body for `PUT /courses/{id}/progress`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProgress {
    pub progress: i16,
}
