//! Repository for the `enrollments` table.

use lectern_core::types::DbId;
use sqlx::PgPool;

use crate::models::enrollment::{EnrolledCourse, Enrollment};

const COLUMNS: &str = "id, course_id, user_id, progress, is_active, enrolled_at, last_accessed_at";

pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Enroll a user and bump the course's `enrollment_count` in one
    /// transaction.
    ///
    /// Returns `None` if the user is already enrolled; the counter is left
    /// untouched in that case.
    pub async fn enroll(
        pool: &PgPool,
        course_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO enrollments (course_id, user_id)
             VALUES ($1, $2)
             ON CONFLICT (course_id, user_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let enrollment = sqlx::query_as::<_, Enrollment>(&query)
            .bind(course_id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        if enrollment.is_some() {
            sqlx::query(
                "UPDATE courses SET enrollment_count = enrollment_count + 1 WHERE id = $1",
            )
            .bind(course_id)
            .execute(&mut *tx)
            .await?;
            tracing::debug!(course_id, user_id, "Enrollment created");
        }

        tx.commit().await?;
        Ok(enrollment)
    }

    pub async fn is_enrolled(
        pool: &PgPool,
        course_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM enrollments
                WHERE course_id = $1 AND user_id = $2 AND is_active = true)",
        )
        .bind(course_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// A user's active enrollments, most recently accessed first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<EnrolledCourse>, sqlx::Error> {
        sqlx::query_as::<_, EnrolledCourse>(
            "SELECT e.course_id, c.title, c.thumbnail_url, c.instructor_id,
                    e.progress, e.enrolled_at, e.last_accessed_at
             FROM enrollments e
             JOIN courses c ON c.id = e.course_id
             WHERE e.user_id = $1 AND e.is_active = true
             ORDER BY e.last_accessed_at DESC, e.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Set progress and touch `last_accessed_at`. `progress` must already be
    /// range-checked.
    pub async fn update_progress(
        pool: &PgPool,
        course_id: DbId,
        user_id: DbId,
        progress: i16,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments SET progress = $3, last_accessed_at = NOW()
             WHERE course_id = $1 AND user_id = $2 AND is_active = true
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(course_id)
            .bind(user_id)
            .bind(progress)
            .fetch_optional(pool)
            .await
    }
}
