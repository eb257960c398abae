//! Repository for the `courses` table.
//!
//! The curriculum and notes live in JSONB columns on the course row, so each
//! authoring operation is a single `UPDATE` that rewrites the document and
//! its derived columns together.
//!
//! Authoring writes are conditional on the `revision` the caller validated
//! against and bump it; `None` from them means the course is gone or was
//! changed in between.

use lectern_core::course::LandingPage;
use lectern_core::curriculum::{summarize, Section};
use lectern_core::notes::Note;
use lectern_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use lectern_core::types::DbId;
use lectern_core::workflow::{CompletedSteps, CourseStatus, STATUS_PUBLISHED};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::course::{Course, CourseFilter, CourseSummary, NewCourse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, instructor_id, title, subtitle, description, category_id, \
    subcategory, topic, language, level, keywords, thumbnail_url, promo_video_url, \
    learning_objectives, requirements, target_audience, price_cents, status, completed_steps, \
    sections, notes, total_duration, total_lectures, content_counts, rating, rating_sum, \
    total_ratings, enrollment_count, revision, published_at, created_at, updated_at";

/// Listing columns, qualified for the join with `users`.
const SUMMARY_COLUMNS: &str = "c.id, c.instructor_id, u.name AS instructor_name, c.title, \
    c.subtitle, c.thumbnail_url, c.category_id, c.level, c.language, c.price_cents, c.status, \
    c.rating, c.total_ratings, c.enrollment_count, c.total_duration, c.total_lectures, \
    c.published_at";

pub struct CourseRepo;

impl CourseRepo {
    /// Insert a course together with its (already normalised) curriculum.
    pub async fn create(pool: &PgPool, input: &NewCourse) -> Result<Course, sqlx::Error> {
        let page = &input.landing_page;
        let summary = summarize(&input.sections);
        let query = format!(
            "INSERT INTO courses (
                instructor_id, title, subtitle, description, category_id, subcategory, topic,
                language, level, keywords, thumbnail_url, promo_video_url, learning_objectives,
                requirements, target_audience, price_cents, status, completed_steps,
                sections, total_duration, total_lectures, content_counts, published_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                     $17, $18, $19, $20, $21, $22,
                     CASE WHEN $17 = '{STATUS_PUBLISHED}' THEN NOW() END)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(input.instructor_id)
            .bind(&page.title)
            .bind(&page.subtitle)
            .bind(&page.description)
            .bind(page.category_id)
            .bind(&page.subcategory)
            .bind(&page.topic)
            .bind(&page.language)
            .bind(&page.level)
            .bind(&page.keywords)
            .bind(&page.thumbnail_url)
            .bind(&page.promo_video_url)
            .bind(&page.learning_objectives)
            .bind(&page.requirements)
            .bind(&page.target_audience)
            .bind(page.price_cents)
            .bind(input.status.as_str())
            .bind(input.completed_steps.to_names())
            .bind(Json(&input.sections))
            .bind(summary.total_duration)
            .bind(summary.total_lectures)
            .bind(Json(&summary.content_counts))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Published courses matching `filter`, most enrolled first.
    pub async fn list_published(
        pool: &PgPool,
        filter: &CourseFilter,
    ) -> Result<Vec<CourseSummary>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(filter.offset);
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)));

        let query = format!(
            "SELECT {SUMMARY_COLUMNS}
             FROM courses c
             JOIN users u ON u.id = c.instructor_id
             WHERE c.status = $1
               AND ($2::BIGINT IS NULL OR c.category_id = $2)
               AND ($3::TEXT IS NULL OR c.level = $3)
               AND ($4::TEXT IS NULL OR c.language = $4)
               AND ($5::TEXT IS NULL OR c.title ILIKE $5)
             ORDER BY c.enrollment_count DESC, c.published_at DESC NULLS LAST, c.id DESC
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, CourseSummary>(&query)
            .bind(STATUS_PUBLISHED)
            .bind(filter.category)
            .bind(&filter.level)
            .bind(&filter.language)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Every course owned by an instructor, any status, newest first.
    pub async fn list_by_instructor(
        pool: &PgPool,
        instructor_id: DbId,
    ) -> Result<Vec<CourseSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS}
             FROM courses c
             JOIN users u ON u.id = c.instructor_id
             WHERE c.instructor_id = $1
             ORDER BY c.created_at DESC, c.id DESC"
        );
        sqlx::query_as::<_, CourseSummary>(&query)
            .bind(instructor_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite the landing-page fields and the completed steps.
    pub async fn update_landing_page(
        pool: &PgPool,
        id: DbId,
        revision: i64,
        page: &LandingPage,
        steps: &CompletedSteps,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                title = $2,
                subtitle = $3,
                description = $4,
                category_id = $5,
                subcategory = $6,
                topic = $7,
                language = $8,
                level = $9,
                keywords = $10,
                thumbnail_url = $11,
                promo_video_url = $12,
                learning_objectives = $13,
                requirements = $14,
                target_audience = $15,
                price_cents = $16,
                completed_steps = $17,
                revision = revision + 1
             WHERE id = $1 AND revision = $18
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&page.title)
            .bind(&page.subtitle)
            .bind(&page.description)
            .bind(page.category_id)
            .bind(&page.subcategory)
            .bind(&page.topic)
            .bind(&page.language)
            .bind(&page.level)
            .bind(&page.keywords)
            .bind(&page.thumbnail_url)
            .bind(&page.promo_video_url)
            .bind(&page.learning_objectives)
            .bind(&page.requirements)
            .bind(&page.target_audience)
            .bind(page.price_cents)
            .bind(steps.to_names())
            .bind(revision)
            .fetch_optional(pool)
            .await
    }

    /// Replace the whole curriculum, its aggregates and the completed steps
    /// in one statement.
    pub async fn replace_curriculum(
        pool: &PgPool,
        id: DbId,
        revision: i64,
        sections: &[Section],
        steps: &CompletedSteps,
    ) -> Result<Option<Course>, sqlx::Error> {
        let summary = summarize(sections);
        let query = format!(
            "UPDATE courses SET
                sections = $3,
                total_duration = $4,
                total_lectures = $5,
                content_counts = $6,
                completed_steps = $7,
                revision = revision + 1
             WHERE id = $1 AND revision = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(revision)
            .bind(Json(sections))
            .bind(summary.total_duration)
            .bind(summary.total_lectures)
            .bind(Json(&summary.content_counts))
            .bind(steps.to_names())
            .fetch_optional(pool)
            .await
    }

    /// Set the publication status and completed steps.
    ///
    /// `published_at` records the first publication and is kept on unpublish.
    pub async fn set_publication(
        pool: &PgPool,
        id: DbId,
        revision: i64,
        status: CourseStatus,
        steps: &CompletedSteps,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                status = $2,
                completed_steps = $3,
                published_at = CASE
                    WHEN $2 = '{STATUS_PUBLISHED}' THEN COALESCE(published_at, NOW())
                    ELSE published_at
                END,
                revision = revision + 1
             WHERE id = $1 AND revision = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(steps.to_names())
            .bind(revision)
            .fetch_optional(pool)
            .await
    }

    /// Delete a course. Ratings, enrollments and wishlist entries cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Notes
    // -----------------------------------------------------------------------

    /// Append a note to the course's note list.
    pub async fn add_note(
        pool: &PgPool,
        id: DbId,
        note: &Note,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET notes = notes || jsonb_build_array($2::JSONB)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(Json(note))
            .fetch_optional(pool)
            .await
    }

    /// Remove a note by id. Returns `true` if the note existed.
    pub async fn remove_note(pool: &PgPool, id: DbId, note_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE courses SET notes = COALESCE(
                (SELECT jsonb_agg(n) FROM jsonb_array_elements(notes) AS n
                 WHERE n->>'id' <> $2),
                '[]'::JSONB)
             WHERE id = $1
               AND EXISTS (SELECT 1 FROM jsonb_array_elements(notes) AS n WHERE n->>'id' = $2)",
        )
        .bind(id)
        .bind(note_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Escape `LIKE` wildcards in user search input.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("rust"), "rust");
        assert_eq!(escape_like("100%_off\\"), "100\\%\\_off\\\\");
    }
}
