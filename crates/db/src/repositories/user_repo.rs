//! Repository for the `users` table.

use lectern_core::roles::ROLE_INSTRUCTOR;
use lectern_core::types::DbId;
use lectern_core::workflow::STATUS_PUBLISHED;
use sqlx::PgPool;

use crate::models::user::{CreateUser, InstructorProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, role, is_active, headline, bio, \
                        last_login_at, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate email fails with the `uq_users_email` unique violation.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email. Callers pass the normalised (lowercased) form.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Set `last_login_at` to now.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Soft-deactivate a user by setting `is_active = false`.
    ///
    /// Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Public profile of an instructor with stats over their published
    /// courses. Returns `None` if the user does not exist or is not an
    /// instructor.
    pub async fn instructor_profile(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InstructorProfile>, sqlx::Error> {
        sqlx::query_as::<_, InstructorProfile>(
            "SELECT u.id, u.name, u.headline, u.bio,
                    COUNT(c.id) AS published_courses,
                    COALESCE(SUM(c.enrollment_count), 0)::BIGINT AS total_enrollments,
                    COALESCE(SUM(c.total_ratings), 0)::BIGINT AS total_ratings,
                    COALESCE(
                        SUM(c.rating_sum)::DOUBLE PRECISION / NULLIF(SUM(c.total_ratings), 0),
                        0
                    ) AS average_rating
             FROM users u
             LEFT JOIN courses c ON c.instructor_id = u.id AND c.status = $3
             WHERE u.id = $1 AND u.role = $2
             GROUP BY u.id",
        )
        .bind(id)
        .bind(ROLE_INSTRUCTOR)
        .bind(STATUS_PUBLISHED)
        .fetch_optional(pool)
        .await
    }
}
