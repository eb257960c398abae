//! Well-known role name constants.
//!
//! These must match the `chk_users_role` constraint in the users migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_INSTRUCTOR: &str = "instructor";
pub const ROLE_STUDENT: &str = "student";

/// Roles a user may pick for themselves at registration.
pub const SELF_ASSIGNABLE_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_INSTRUCTOR];

/// Validate a role chosen during self-registration.
pub fn validate_self_assignable_role(role: &str) -> Result<(), String> {
    if SELF_ASSIGNABLE_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            SELF_ASSIGNABLE_ROLES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_and_instructor_are_self_assignable() {
        assert!(validate_self_assignable_role(ROLE_STUDENT).is_ok());
        assert!(validate_self_assignable_role(ROLE_INSTRUCTOR).is_ok());
    }

    #[test]
    fn admin_cannot_self_register() {
        let err = validate_self_assignable_role(ROLE_ADMIN).unwrap_err();
        assert!(err.contains("student, instructor"));
    }
}
