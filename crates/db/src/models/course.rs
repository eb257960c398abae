//! Course aggregate model.
//!
//! The curriculum and course notes are embedded JSONB documents; everything
//! else is a plain column. `sections` and `notes` are never serialised with
//! the course record itself: the curriculum is served through its own
//! endpoint (which applies enrollment locking) and notes through theirs.

use std::collections::BTreeMap;

use lectern_core::course::LandingPage;
use lectern_core::curriculum::{ContentType, Section};
use lectern_core::notes::Note;
use lectern_core::policy::CourseScope;
use lectern_core::rating::RatingAggregate;
use lectern_core::types::{DbId, Timestamp};
use lectern_core::workflow::{CompletedSteps, CourseStatus};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: DbId,
    pub instructor_id: DbId,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub category_id: Option<DbId>,
    pub subcategory: Option<String>,
    pub topic: Option<String>,
    pub language: String,
    pub level: String,
    pub keywords: Vec<String>,
    pub thumbnail_url: Option<String>,
    pub promo_video_url: Option<String>,
    pub learning_objectives: Vec<String>,
    pub requirements: Vec<String>,
    pub target_audience: Vec<String>,
    pub price_cents: i64,
    pub status: String,
    pub completed_steps: Vec<String>,
    #[serde(skip_serializing)]
    pub sections: Json<Vec<Section>>,
    #[serde(skip_serializing)]
    pub notes: Json<Vec<Note>>,
    pub total_duration: i64,
    pub total_lectures: i32,
    pub content_counts: Json<BTreeMap<ContentType, i32>>,
    pub rating: f64,
    pub rating_sum: i64,
    pub total_ratings: i64,
    pub enrollment_count: i64,
    /// Bumped by every authoring write.
    pub revision: i64,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Course {
    /// Publication status. The `chk_courses_status` constraint guarantees a
    /// known value.
    pub fn course_status(&self) -> CourseStatus {
        CourseStatus::from_str_value(&self.status).unwrap_or_default()
    }

    /// Completed workflow steps. The `chk_courses_completed_steps`
    /// constraint guarantees known names.
    pub fn workflow_steps(&self) -> CompletedSteps {
        CompletedSteps::from_names(&self.completed_steps).unwrap_or_default()
    }

    pub fn landing_page(&self) -> LandingPage {
        LandingPage {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            description: self.description.clone(),
            category_id: self.category_id,
            subcategory: self.subcategory.clone(),
            topic: self.topic.clone(),
            language: self.language.clone(),
            level: self.level.clone(),
            keywords: self.keywords.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            promo_video_url: self.promo_video_url.clone(),
            learning_objectives: self.learning_objectives.clone(),
            requirements: self.requirements.clone(),
            target_audience: self.target_audience.clone(),
            price_cents: self.price_cents,
        }
    }

    pub fn rating_aggregate(&self) -> RatingAggregate {
        RatingAggregate {
            rating: self.rating,
            rating_sum: self.rating_sum,
            total_ratings: self.total_ratings,
        }
    }

    /// Authorization facts for this course.
    pub fn scope(&self, actor_enrolled: bool) -> CourseScope {
        CourseScope {
            course_id: self.id,
            instructor_id: self.instructor_id,
            status: self.course_status(),
            actor_enrolled,
        }
    }
}

/// Catalog listing row: a published course without its embedded documents.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: DbId,
    pub instructor_id: DbId,
    pub instructor_name: String,
    pub title: String,
    pub subtitle: String,
    pub thumbnail_url: Option<String>,
    pub category_id: Option<DbId>,
    pub level: String,
    pub language: String,
    pub price_cents: i64,
    pub status: String,
    pub rating: f64,
    pub total_ratings: i64,
    pub enrollment_count: i64,
    pub total_duration: i64,
    pub total_lectures: i32,
    pub published_at: Option<Timestamp>,
}

/// Query parameters for `GET /courses`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseFilter {
    pub category: Option<DbId>,
    pub level: Option<String>,
    pub language: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// DTO for inserting a course. `sections` must already be normalised.
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub instructor_id: DbId,
    pub landing_page: LandingPage,
    pub status: CourseStatus,
    pub completed_steps: CompletedSteps,
    pub sections: Vec<Section>,
}
