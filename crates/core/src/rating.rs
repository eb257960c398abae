//! Course rating aggregate and the per-user upsert rule.
//!
//! A course keeps a running `rating_sum` and `total_ratings` alongside the
//! mean. A user rating the same course again replaces their previous value:
//! the sum moves by the difference and the count stays put.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

/// Reject values outside `1..=5`.
pub fn validate_rating_value(value: i16) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {value}"
        )))
    }
}

/// Denormalised rating counters stored on the course row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingAggregate {
    pub rating: f64,
    pub rating_sum: i64,
    pub total_ratings: i64,
}

impl RatingAggregate {
    /// Build an aggregate from counters, deriving the mean.
    pub fn from_counters(rating_sum: i64, total_ratings: i64) -> Self {
        Self {
            rating: mean(rating_sum, total_ratings),
            rating_sum,
            total_ratings,
        }
    }

    /// Apply one user's rating. `previous` is that user's existing value, if
    /// they rated this course before.
    pub fn upsert(&self, previous: Option<i16>, value: i16) -> Result<Self, CoreError> {
        validate_rating_value(value)?;
        Ok(self.apply(previous, value))
    }

    /// [`upsert`](Self::upsert) without range validation, for callers that
    /// already validated `value`.
    pub fn apply(&self, previous: Option<i16>, value: i16) -> Self {
        let (rating_sum, total_ratings) = match previous {
            Some(old) => (
                self.rating_sum + i64::from(value) - i64::from(old),
                self.total_ratings,
            ),
            None => (self.rating_sum + i64::from(value), self.total_ratings + 1),
        };
        Self::from_counters(rating_sum, total_ratings)
    }
}

/// `sum / count`, or 0 when nothing has been rated.
pub fn mean(rating_sum: i64, total_ratings: i64) -> f64 {
    if total_ratings > 0 {
        rating_sum as f64 / total_ratings as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn out_of_range_values_are_rejected() {
        for value in [0, 6, -1] {
            assert_matches!(validate_rating_value(value), Err(CoreError::Validation(_)));
        }
        for value in MIN_RATING..=MAX_RATING {
            assert!(validate_rating_value(value).is_ok());
        }
    }

    #[test]
    fn two_users_then_a_rerate() {
        let start = RatingAggregate::default();

        let a = start.upsert(None, 4).unwrap();
        assert_eq!((a.rating_sum, a.total_ratings), (4, 1));
        assert_eq!(a.rating, 4.0);

        let b = a.upsert(None, 2).unwrap();
        assert_eq!((b.rating_sum, b.total_ratings), (6, 2));
        assert_eq!(b.rating, 3.0);

        let a_again = b.upsert(Some(4), 5).unwrap();
        assert_eq!((a_again.rating_sum, a_again.total_ratings), (7, 2));
        assert_eq!(a_again.rating, 3.5);
    }

    #[test]
    fn rerating_moves_sum_by_difference_only() {
        let first = RatingAggregate::default().upsert(None, 3).unwrap();
        let second = first.upsert(Some(3), 5).unwrap();
        assert_eq!(second.total_ratings, first.total_ratings);
        assert_eq!(second.rating_sum - first.rating_sum, 2);
        assert_eq!(second.rating, mean(second.rating_sum, second.total_ratings));
    }

    #[test]
    fn invalid_value_leaves_aggregate_untouched() {
        let agg = RatingAggregate::from_counters(9, 3);
        assert!(agg.upsert(None, 9).is_err());
        assert_eq!(agg.total_ratings, 3);
    }

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean(0, 0), 0.0);
        assert_eq!(RatingAggregate::from_counters(0, 0).rating, 0.0);
    }
}
