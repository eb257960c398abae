//! Repository for the `course_ratings` table and the rating counters on
//! `courses`.

use lectern_core::rating::RatingAggregate;
use lectern_core::types::DbId;
use sqlx::PgPool;

use crate::models::rating::{CourseRating, RatingWithUser};

const COLUMNS: &str = "id, course_id, user_id, value, comment, created_at, updated_at";

pub struct RatingRepo;

impl RatingRepo {
    /// Insert or replace one user's rating and update the course aggregate.
    ///
    /// Runs in a transaction holding a row lock on the course, so concurrent
    /// upserts for the same course serialise and the counters always match
    /// the rating rows. `value` must already be range-checked. Returns `None`
    /// if the course does not exist.
    pub async fn upsert(
        pool: &PgPool,
        course_id: DbId,
        user_id: DbId,
        value: i16,
        comment: Option<&str>,
    ) -> Result<Option<RatingAggregate>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let counters: Option<(i64, i64)> = sqlx::query_as(
            "SELECT rating_sum, total_ratings FROM courses WHERE id = $1 FOR UPDATE",
        )
        .bind(course_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((rating_sum, total_ratings)) = counters else {
            return Ok(None);
        };

        let previous: Option<i16> = sqlx::query_scalar(
            "SELECT value FROM course_ratings WHERE course_id = $1 AND user_id = $2",
        )
        .bind(course_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO course_ratings (course_id, user_id, value, comment)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (course_id, user_id)
             DO UPDATE SET value = EXCLUDED.value, comment = EXCLUDED.comment",
        )
        .bind(course_id)
        .bind(user_id)
        .bind(value)
        .bind(comment)
        .execute(&mut *tx)
        .await?;

        let aggregate =
            RatingAggregate::from_counters(rating_sum, total_ratings).apply(previous, value);

        sqlx::query(
            "UPDATE courses SET rating = $2, rating_sum = $3, total_ratings = $4 WHERE id = $1",
        )
        .bind(course_id)
        .bind(aggregate.rating)
        .bind(aggregate.rating_sum)
        .bind(aggregate.total_ratings)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(
            course_id,
            user_id,
            value,
            replaced = previous.is_some(),
            rating = aggregate.rating,
            "Rating upserted"
        );
        Ok(Some(aggregate))
    }

    pub async fn find(
        pool: &PgPool,
        course_id: DbId,
        user_id: DbId,
    ) -> Result<Option<CourseRating>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM course_ratings WHERE course_id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, CourseRating>(&query)
            .bind(course_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Ratings for a course with rater names, most recently changed first.
    pub async fn list_for_course(
        pool: &PgPool,
        course_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RatingWithUser>, sqlx::Error> {
        sqlx::query_as::<_, RatingWithUser>(
            "SELECT r.user_id, u.name AS user_name, r.value, r.comment, r.updated_at
             FROM course_ratings r
             JOIN users u ON u.id = r.user_id
             WHERE r.course_id = $1
             ORDER BY r.updated_at DESC, r.id DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(course_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }
}
