//! Course-scoped authorization policy.
//!
//! Every handler that touches a course asks [`authorize`] with the acting
//! user, the action, and the course it acts on. Role-only gates (e.g.
//! "instructors may create courses") live in the API's extractors; anything
//! that depends on the course itself is decided here.

use crate::curriculum::ContentAccess;
use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_STUDENT};
use crate::types::DbId;
use crate::workflow::CourseStatus;

/// The authenticated user performing an action.
#[derive(Debug, Clone, Copy)]
pub struct Actor<'a> {
    pub user_id: DbId,
    pub role: &'a str,
}

impl Actor<'_> {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    pub fn is_student(&self) -> bool {
        self.role == ROLE_STUDENT
    }
}

/// The facts about a course that authorization depends on.
#[derive(Debug, Clone, Copy)]
pub struct CourseScope {
    pub course_id: DbId,
    pub instructor_id: DbId,
    pub status: CourseStatus,
    /// Whether the acting user holds an enrollment for this course.
    pub actor_enrolled: bool,
}

impl CourseScope {
    pub fn is_owned_by(&self, actor: &Actor<'_>) -> bool {
        self.instructor_id == actor.user_id
    }

    fn is_published(&self) -> bool {
        self.status == CourseStatus::Published
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseAction {
    /// Read the course record.
    View,
    /// Change landing page, curriculum, notes, publication, or delete.
    Edit,
    Enroll,
    Rate,
    ViewNotes,
    /// Update own learning progress.
    TrackProgress,
}

/// Decide whether `actor` may perform `action` on the course.
///
/// Drafts a caller may not see are reported as not found, so their existence
/// is not disclosed. Edits are the exception: an existing course edited by
/// someone other than its owner is refused with `Forbidden`.
pub fn authorize(
    actor: Option<&Actor<'_>>,
    action: CourseAction,
    course: &CourseScope,
) -> Result<(), CoreError> {
    let owner_or_admin = actor.is_some_and(|a| a.is_admin() || course.is_owned_by(a));

    if action == CourseAction::Edit {
        if actor.is_none() {
            return Err(CoreError::Unauthorized("Authentication required".into()));
        }
        return if owner_or_admin {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "Only the course instructor can modify this course".into(),
            ))
        };
    }

    if !course.is_published() && !owner_or_admin {
        return Err(CoreError::NotFound {
            entity: "Course",
            id: course.course_id,
        });
    }

    if action == CourseAction::View {
        return Ok(());
    }

    let Some(actor) = actor else {
        return Err(CoreError::Unauthorized("Authentication required".into()));
    };

    match action {
        CourseAction::View | CourseAction::Edit => Ok(()),
        CourseAction::Enroll => {
            if !actor.is_student() {
                return Err(CoreError::Forbidden("Only students can enroll".into()));
            }
            if !course.is_published() {
                return Err(CoreError::Validation(
                    "Course is not open for enrollment".into(),
                ));
            }
            Ok(())
        }
        CourseAction::Rate | CourseAction::TrackProgress => {
            if actor.is_student() && course.actor_enrolled {
                Ok(())
            } else {
                Err(CoreError::Forbidden(
                    "You must be enrolled in this course".into(),
                ))
            }
        }
        CourseAction::ViewNotes => {
            if owner_or_admin || course.actor_enrolled {
                Ok(())
            } else {
                Err(CoreError::Forbidden(
                    "You must be enrolled in this course".into(),
                ))
            }
        }
    }
}

/// How much of the curriculum the caller may see.
pub fn content_access(actor: Option<&Actor<'_>>, course: &CourseScope) -> ContentAccess {
    match actor {
        Some(a) if a.is_admin() || course.is_owned_by(a) => ContentAccess::Full,
        Some(_) if course.actor_enrolled => ContentAccess::Enrolled,
        _ => ContentAccess::Visitor,
    }
}
