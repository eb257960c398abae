//! Course authoring workflow: the linear `landing-page → curriculum → publish`
//! step sequence and the draft/published status that runs alongside it.
//!
//! Step gating is an explicit transition table ([`WorkflowStep::prerequisites`])
//! rather than ad hoc membership checks in handlers.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const STEP_LANDING_PAGE: &str = "landing-page";
pub const STEP_CURRICULUM: &str = "curriculum";
pub const STEP_PUBLISH: &str = "publish";

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PUBLISHED: &str = "published";

/// All valid status strings.
pub const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_PUBLISHED];

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// One stage of the authoring workflow, in sequence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowStep {
    LandingPage,
    Curriculum,
    Publish,
}

impl WorkflowStep {
    pub const ALL: [WorkflowStep; 3] = [Self::LandingPage, Self::Curriculum, Self::Publish];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LandingPage => STEP_LANDING_PAGE,
            Self::Curriculum => STEP_CURRICULUM,
            Self::Publish => STEP_PUBLISH,
        }
    }

    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STEP_LANDING_PAGE => Ok(Self::LandingPage),
            STEP_CURRICULUM => Ok(Self::Curriculum),
            STEP_PUBLISH => Ok(Self::Publish),
            _ => Err(format!(
                "Invalid workflow step '{s}'. Must be one of: {STEP_LANDING_PAGE}, \
                 {STEP_CURRICULUM}, {STEP_PUBLISH}"
            )),
        }
    }

    /// Whether this step must be saved before later steps can be entered.
    ///
    /// `publish` is not: it is gated by publish validation instead.
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::Publish)
    }

    /// Transition table: the steps that must be completed before this one.
    pub fn prerequisites(&self) -> &'static [WorkflowStep] {
        match self {
            Self::LandingPage => &[],
            Self::Curriculum => &[Self::LandingPage],
            Self::Publish => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// Completed steps
// ---------------------------------------------------------------------------

/// The set of steps saved at least once, kept in sequence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletedSteps(Vec<WorkflowStep>);

impl CompletedSteps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the persisted step names. Unknown names are rejected.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, String> {
        let mut steps = Self::new();
        for name in names {
            steps.insert(WorkflowStep::from_str_value(name.as_ref())?);
        }
        Ok(steps)
    }

    /// Step names in sequence order, as persisted.
    pub fn to_names(&self) -> Vec<String> {
        self.0.iter().map(|s| s.as_str().to_string()).collect()
    }

    pub fn contains(&self, step: WorkflowStep) -> bool {
        self.0.contains(&step)
    }

    /// Add a step if absent. Returns `true` if it was added.
    pub fn insert(&mut self, step: WorkflowStep) -> bool {
        if self.contains(step) {
            return false;
        }
        self.0.push(step);
        self.0.sort();
        true
    }

    /// Remove a step if present. Returns `true` if it was removed.
    pub fn remove(&mut self, step: WorkflowStep) -> bool {
        let before = self.0.len();
        self.0.retain(|s| *s != step);
        self.0.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkflowStep> {
        self.0.iter()
    }

    /// Reject entering `step` unless all of its prerequisites are completed.
    pub fn ensure_can_enter(&self, step: WorkflowStep) -> Result<(), CoreError> {
        let missing: Vec<&str> = step
            .prerequisites()
            .iter()
            .filter(|p| p.is_required() && !self.contains(**p))
            .map(|p| p.as_str())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Step '{}' requires completing: {}",
                step.as_str(),
                missing.join(", ")
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Publication status of a course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    #[default]
    Draft,
    Published,
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::Published => STATUS_PUBLISHED,
        }
    }

    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_DRAFT => Ok(Self::Draft),
            STATUS_PUBLISHED => Ok(Self::Published),
            _ => Err(format!(
                "Invalid course status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn steps_serialise_as_kebab_case() {
        let json = serde_json::to_string(&WorkflowStep::LandingPage).unwrap();
        assert_eq!(json, "\"landing-page\"");
        for step in WorkflowStep::ALL {
            assert_eq!(WorkflowStep::from_str_value(step.as_str()), Ok(step));
        }
    }

    #[test]
    fn curriculum_requires_landing_page() {
        let mut steps = CompletedSteps::new();
        assert_matches!(
            steps.ensure_can_enter(WorkflowStep::Curriculum),
            Err(CoreError::Validation(msg)) if msg.contains("landing-page")
        );

        steps.insert(WorkflowStep::LandingPage);
        assert!(steps.ensure_can_enter(WorkflowStep::Curriculum).is_ok());
    }

    #[test]
    fn landing_page_and_publish_are_always_enterable() {
        let steps = CompletedSteps::new();
        assert!(steps.ensure_can_enter(WorkflowStep::LandingPage).is_ok());
        assert!(steps.ensure_can_enter(WorkflowStep::Publish).is_ok());
    }

    #[test]
    fn insert_is_idempotent_and_ordered() {
        let mut steps = CompletedSteps::new();
        assert!(steps.insert(WorkflowStep::Publish));
        assert!(steps.insert(WorkflowStep::LandingPage));
        assert!(!steps.insert(WorkflowStep::LandingPage));
        assert_eq!(steps.to_names(), vec!["landing-page", "publish"]);
    }

    #[test]
    fn remove_reports_presence() {
        let mut steps =
            CompletedSteps::from_names(&["landing-page", "curriculum", "publish"]).unwrap();
        assert!(steps.remove(WorkflowStep::Publish));
        assert!(!steps.remove(WorkflowStep::Publish));
        assert_eq!(steps.to_names(), vec!["landing-page", "curriculum"]);
    }

    #[test]
    fn unknown_step_names_are_rejected() {
        assert!(CompletedSteps::from_names(&["landing-page", "pricing"]).is_err());
    }

    #[test]
    fn status_parses_known_values_only() {
        assert_eq!(CourseStatus::from_str_value("draft"), Ok(CourseStatus::Draft));
        assert_eq!(
            CourseStatus::from_str_value("published"),
            Ok(CourseStatus::Published)
        );
        assert!(CourseStatus::from_str_value("archived").is_err());
        assert_eq!(CourseStatus::default(), CourseStatus::Draft);
    }
}
