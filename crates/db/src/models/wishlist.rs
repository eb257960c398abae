//! Wishlist entry model.

use lectern_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A wishlisted course with the fields a wishlist page shows.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub course_id: DbId,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub rating: f64,
    pub price_cents: i64,
    pub added_at: Timestamp,
}
