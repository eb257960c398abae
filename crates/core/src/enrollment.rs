//! Enrollment progress rules.

use crate::error::CoreError;

pub const MAX_PROGRESS_PERCENT: i16 = 100;

/// Progress is a whole percentage in `0..=100`.
pub fn validate_progress(percent: i16) -> Result<(), CoreError> {
    if (0..=MAX_PROGRESS_PERCENT).contains(&percent) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Progress must be between 0 and {MAX_PROGRESS_PERCENT}, got {percent}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(validate_progress(0).is_ok());
        assert!(validate_progress(100).is_ok());
        assert!(validate_progress(-1).is_err());
        assert!(validate_progress(101).is_err());
    }
}
