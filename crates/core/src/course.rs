//! Course landing-page data and the two validation tiers applied to it.
//!
//! Drafts only need a title so authors can save incomplete work at any time.
//! Publishing runs the full rule set in [`publish_violations`] and reports
//! every rule that fails, not just the first.

use serde::{Deserialize, Serialize};

use crate::curriculum::{has_non_empty_section, Section, SectionInput};
use crate::error::CoreError;
use crate::types::DbId;
use crate::workflow::CourseStatus;

/// Minimum description length (in characters) for a published course.
pub const MIN_PUBLISH_DESCRIPTION_CHARS: usize = 200;

/// Minimum number of non-blank learning objectives for a published course.
pub const MIN_LEARNING_OBJECTIVES: usize = 4;

pub const LEVEL_BEGINNER: &str = "beginner";
pub const LEVEL_INTERMEDIATE: &str = "intermediate";
pub const LEVEL_ADVANCED: &str = "advanced";
pub const LEVEL_ALL: &str = "all_levels";

/// All valid course levels. An empty level is allowed while drafting.
pub const VALID_LEVELS: &[&str] = &[LEVEL_BEGINNER, LEVEL_INTERMEDIATE, LEVEL_ADVANCED, LEVEL_ALL];

// ---------------------------------------------------------------------------
// Landing page
// ---------------------------------------------------------------------------

/// Descriptive fields edited on the landing-page step.
///
/// Every field has an empty-but-valid default so a draft can be created from
/// a title alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LandingPage {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub category_id: Option<DbId>,
    pub subcategory: Option<String>,
    pub topic: Option<String>,
    pub language: String,
    pub level: String,
    pub keywords: Vec<String>,
    pub thumbnail_url: Option<String>,
    pub promo_video_url: Option<String>,
    pub learning_objectives: Vec<String>,
    pub requirements: Vec<String>,
    pub target_audience: Vec<String>,
    pub price_cents: i64,
}

/// Partial landing-page update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LandingPageUpdate {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub subcategory: Option<String>,
    pub topic: Option<String>,
    pub language: Option<String>,
    pub level: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub thumbnail_url: Option<String>,
    pub promo_video_url: Option<String>,
    pub learning_objectives: Option<Vec<String>>,
    pub requirements: Option<Vec<String>>,
    pub target_audience: Option<Vec<String>>,
    pub price_cents: Option<i64>,
}

impl LandingPage {
    /// Apply a partial update in place.
    pub fn apply(&mut self, update: LandingPageUpdate) {
        fn set<T>(target: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *target = v;
            }
        }
        fn set_opt<T>(target: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *target = value;
            }
        }

        set(&mut self.title, update.title);
        set(&mut self.subtitle, update.subtitle);
        set(&mut self.description, update.description);
        set_opt(&mut self.category_id, update.category_id);
        set_opt(&mut self.subcategory, update.subcategory);
        set_opt(&mut self.topic, update.topic);
        set(&mut self.language, update.language);
        set(&mut self.level, update.level);
        set(&mut self.keywords, update.keywords);
        set_opt(&mut self.thumbnail_url, update.thumbnail_url);
        set_opt(&mut self.promo_video_url, update.promo_video_url);
        set(&mut self.learning_objectives, update.learning_objectives);
        set(&mut self.requirements, update.requirements);
        set(&mut self.target_audience, update.target_audience);
        set(&mut self.price_cents, update.price_cents);
    }

    /// Trim the title and drop blank list entries.
    pub fn normalize(&mut self) {
        self.title = self.title.trim().to_string();
        for list in [
            &mut self.keywords,
            &mut self.learning_objectives,
            &mut self.requirements,
            &mut self.target_audience,
        ] {
            list.retain(|s| !s.trim().is_empty());
        }
    }
}

/// Request body for `POST /courses`.
///
/// A draft needs only a title. A course created as `published` must carry a
/// complete landing page and curriculum.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseInput {
    #[serde(flatten)]
    pub landing_page: LandingPage,
    #[serde(default)]
    pub status: CourseStatus,
    #[serde(default)]
    pub sections: Vec<SectionInput>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A single publish-validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishRule {
    Title,
    Subtitle,
    Description,
    Category,
    Thumbnail,
    LearningObjectives,
    Requirements,
    TargetAudience,
    Curriculum,
}

impl PublishRule {
    pub fn message(&self) -> String {
        match self {
            Self::Title => "Course title is required".to_string(),
            Self::Subtitle => "Course subtitle is required".to_string(),
            Self::Description => format!(
                "Course description must be at least {MIN_PUBLISH_DESCRIPTION_CHARS} characters"
            ),
            Self::Category => "Course category is required".to_string(),
            Self::Thumbnail => "Course thumbnail is required".to_string(),
            Self::LearningObjectives => format!(
                "At least {MIN_LEARNING_OBJECTIVES} learning objectives are required"
            ),
            Self::Requirements => "At least one requirement is required".to_string(),
            Self::TargetAudience => "At least one target audience entry is required".to_string(),
            Self::Curriculum => {
                "Course must have at least one section with content".to_string()
            }
        }
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn count_non_blank(items: &[String]) -> usize {
    items.iter().filter(|s| !is_blank(s)).count()
}

/// Every publish rule the course currently violates, in a fixed order.
pub fn publish_violations(page: &LandingPage, sections: &[Section]) -> Vec<PublishRule> {
    let mut violations = Vec::new();

    if is_blank(&page.title) {
        violations.push(PublishRule::Title);
    }
    if is_blank(&page.subtitle) {
        violations.push(PublishRule::Subtitle);
    }
    if page.description.trim().chars().count() < MIN_PUBLISH_DESCRIPTION_CHARS {
        violations.push(PublishRule::Description);
    }
    if page.category_id.is_none() {
        violations.push(PublishRule::Category);
    }
    if page.thumbnail_url.as_deref().map_or(true, is_blank) {
        violations.push(PublishRule::Thumbnail);
    }
    if count_non_blank(&page.learning_objectives) < MIN_LEARNING_OBJECTIVES {
        violations.push(PublishRule::LearningObjectives);
    }
    if count_non_blank(&page.requirements) == 0 {
        violations.push(PublishRule::Requirements);
    }
    if count_non_blank(&page.target_audience) == 0 {
        violations.push(PublishRule::TargetAudience);
    }
    if sections.is_empty() || !has_non_empty_section(sections) {
        violations.push(PublishRule::Curriculum);
    }

    violations
}

/// Fail with the full list of violated rules, if any.
pub fn ensure_publishable(page: &LandingPage, sections: &[Section]) -> Result<(), CoreError> {
    let violations = publish_violations(page, sections);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CoreError::InvalidFields(
            violations.iter().map(PublishRule::message).collect(),
        ))
    }
}

/// Minimal validation for persisting a draft: a non-empty title and, if a
/// level is given, a known one.
pub fn validate_draft(page: &LandingPage) -> Result<(), CoreError> {
    if is_blank(&page.title) {
        return Err(CoreError::Validation("Course title is required".into()));
    }
    validate_level(&page.level)
}

fn validate_level(level: &str) -> Result<(), CoreError> {
    if level.is_empty() || VALID_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid level '{level}'. Must be one of: {}",
            VALID_LEVELS.join(", ")
        )))
    }
}

/// Validate a landing page for a course in the given status.
pub fn validate_for_status(
    page: &LandingPage,
    sections: &[Section],
    status: CourseStatus,
) -> Result<(), CoreError> {
    validate_draft(page)?;
    match status {
        CourseStatus::Draft => Ok(()),
        CourseStatus::Published => ensure_publishable(page, sections),
    }
}
