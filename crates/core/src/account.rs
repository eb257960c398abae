//! Account registration input and validation.

use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::roles::{validate_self_assignable_role, ROLE_STUDENT};

fn default_role() -> String {
    ROLE_STUDENT.to_string()
}

/// Request body for self-registration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Registration {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub password: String,
    /// `student` (default) or `instructor`.
    #[serde(default = "default_role")]
    pub role: String,
}

impl Registration {
    /// Validate field formats, the chosen role, and password length.
    pub fn check(&self, min_password_length: usize) -> Result<(), CoreError> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => match CoreError::from(e) {
                CoreError::InvalidFields(list) => list,
                other => return Err(other),
            },
        };
        if let Err(msg) = validate_self_assignable_role(&self.role) {
            errors.push(format!("role: {msg}"));
        }
        if self.password.chars().count() < min_password_length {
            errors.push(format!(
                "password: must be at least {min_password_length} characters long"
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(errors))
        }
    }

    /// Emails are compared case-insensitively; store them lowercased.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}
