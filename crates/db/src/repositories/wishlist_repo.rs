//! Repository for the `wishlist_items` table.

use lectern_core::types::DbId;
use sqlx::PgPool;

use crate::models::wishlist::WishlistEntry;

pub struct WishlistRepo;

impl WishlistRepo {
    /// Add a course to a user's wishlist. Adding twice is a no-op; returns
    /// `true` only when a new entry was created.
    pub async fn add(pool: &PgPool, user_id: DbId, course_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO wishlist_items (user_id, course_id)
             VALUES ($1, $2)
             ON CONFLICT (user_id, course_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(course_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn remove(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM wishlist_items WHERE user_id = $1 AND course_id = $2")
                .bind(user_id)
                .bind(course_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Wishlisted courses, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<WishlistEntry>, sqlx::Error> {
        sqlx::query_as::<_, WishlistEntry>(
            "SELECT w.course_id, c.title, c.thumbnail_url, c.rating, c.price_cents,
                    w.created_at AS added_at
             FROM wishlist_items w
             JOIN courses c ON c.id = w.course_id
             WHERE w.user_id = $1
             ORDER BY w.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
