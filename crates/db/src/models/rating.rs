//! Course rating models.

use lectern_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `course_ratings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRating {
    pub id: DbId,
    pub course_id: DbId,
    pub user_id: DbId,
    pub value: i16,
    pub comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A rating with the rater's display name, for public listings.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingWithUser {
    pub user_id: DbId,
    pub user_name: String,
    pub value: i16,
    pub comment: Option<String>,
    pub updated_at: Timestamp,
}

/// Request body for `POST /courses/{id}/rate`.
#[derive(Debug, Clone, Deserialize)]
pub struct RateCourse {
    pub value: i16,
    #[serde(default)]
    pub comment: Option<String>,
}
