//! Course curriculum model: the ordered section → content tree embedded in a
//! course, plus the normalisation applied when an instructor replaces it.
//!
//! Content items are a tagged union. Each variant carries exactly its own
//! payload, so a `video` item can never persist a stray `quiz` field: the
//! payload is chosen from the input by `contentType` at write time and every
//! other payload field the client sent is dropped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::notes::Note;

// ---------------------------------------------------------------------------
// Content types
// ---------------------------------------------------------------------------

/// Discriminant of a content item (`contentType` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Video,
    VideoSlideMashup,
    Article,
    Quiz,
    CodingExercise,
    Assignment,
    Document,
}

impl ContentType {
    /// The wire name of this content type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::VideoSlideMashup => "video_slide_mashup",
            Self::Article => "article",
            Self::Quiz => "quiz",
            Self::CodingExercise => "coding_exercise",
            Self::Assignment => "assignment",
            Self::Document => "document",
        }
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoPayload {
    pub url: String,
    pub public_id: Option<String>,
    pub thumbnail_url: Option<String>,
    pub captions: Vec<Caption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Caption {
    pub language: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoSlideMashupPayload {
    pub video_url: String,
    pub slides: Vec<Slide>,
}

/// A slide shown from `start_seconds` into the accompanying video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Slide {
    pub url: String,
    pub start_seconds: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticlePayload {
    pub body: String,
    pub estimated_read_minutes: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizPayload {
    pub questions: Vec<QuizQuestion>,
    /// Percentage of correct answers needed to pass.
    pub passing_score: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_option: u32,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodingExercisePayload {
    pub language: String,
    pub instructions: String,
    pub starter_code: String,
    pub solution_code: String,
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentPayload {
    pub instructions: String,
    pub submission_type: String,
    pub due_in_days: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentPayload {
    pub url: String,
    pub file_name: String,
    pub file_size: u64,
    pub mime_type: Option<String>,
}

/// The variant-specific payload of a content item.
///
/// Serialises internally tagged, e.g.
/// `{"contentType": "video", "video": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "contentType", rename_all = "snake_case")]
pub enum ContentPayload {
    Video {
        video: VideoPayload,
    },
    VideoSlideMashup {
        #[serde(rename = "videoSlideMashup")]
        video_slide_mashup: VideoSlideMashupPayload,
    },
    Article {
        article: ArticlePayload,
    },
    Quiz {
        quiz: QuizPayload,
    },
    CodingExercise {
        #[serde(rename = "codingExercise")]
        coding_exercise: CodingExercisePayload,
    },
    Assignment {
        assignment: AssignmentPayload,
    },
    Document {
        document: DocumentPayload,
    },
}

impl ContentPayload {
    /// An empty payload of the given type.
    pub fn empty(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Video => Self::Video {
                video: VideoPayload::default(),
            },
            ContentType::VideoSlideMashup => Self::VideoSlideMashup {
                video_slide_mashup: VideoSlideMashupPayload::default(),
            },
            ContentType::Article => Self::Article {
                article: ArticlePayload::default(),
            },
            ContentType::Quiz => Self::Quiz {
                quiz: QuizPayload::default(),
            },
            ContentType::CodingExercise => Self::CodingExercise {
                coding_exercise: CodingExercisePayload::default(),
            },
            ContentType::Assignment => Self::Assignment {
                assignment: AssignmentPayload::default(),
            },
            ContentType::Document => Self::Document {
                document: DocumentPayload::default(),
            },
        }
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Video { .. } => ContentType::Video,
            Self::VideoSlideMashup { .. } => ContentType::VideoSlideMashup,
            Self::Article { .. } => ContentType::Article,
            Self::Quiz { .. } => ContentType::Quiz,
            Self::CodingExercise { .. } => ContentType::CodingExercise,
            Self::Assignment { .. } => ContentType::Assignment,
            Self::Document { .. } => ContentType::Document,
        }
    }
}

// ---------------------------------------------------------------------------
// Persisted tree
// ---------------------------------------------------------------------------

/// A downloadable or linked resource attached to a content item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resource {
    pub title: String,
    pub url: String,
    pub kind: Option<String>,
}

/// A single learnable unit within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Length in seconds.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub is_preview: bool,
    #[serde(default)]
    pub is_free: bool,
    pub sort_order: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
    #[serde(flatten)]
    pub payload: ContentPayload,
}

impl Content {
    pub fn content_type(&self) -> ContentType {
        self.payload.content_type()
    }

    /// Copy with payload, resources and notes withheld; the type is kept.
    fn redacted(&self) -> Content {
        Content {
            resources: Vec::new(),
            notes: Vec::new(),
            payload: ContentPayload::empty(self.content_type()),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionAnalytics {
    /// Sum of child durations in seconds.
    pub total_duration: i64,
    pub content_count: i32,
}

/// An ordered grouping of content within a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub sort_order: u32,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub content: Vec<Content>,
    #[serde(default)]
    pub analytics: SectionAnalytics,
}

fn default_true() -> bool {
    true
}

/// Course-level aggregates derived from the curriculum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumSummary {
    pub total_duration: i64,
    pub total_lectures: i32,
    pub content_counts: BTreeMap<ContentType, i32>,
}

/// Compute course-level aggregates from a section list.
pub fn summarize(sections: &[Section]) -> CurriculumSummary {
    let mut summary = CurriculumSummary::default();
    for item in sections.iter().flat_map(|s| s.content.iter()) {
        summary.total_duration += i64::from(item.duration);
        summary.total_lectures += 1;
        *summary
            .content_counts
            .entry(item.content_type())
            .or_insert(0) += 1;
    }
    summary
}

/// Whether at least one section has content. Used by publish validation.
pub fn has_non_empty_section(sections: &[Section]) -> bool {
    sections.iter().any(|s| !s.content.is_empty())
}

// ---------------------------------------------------------------------------
// Replace-curriculum input
// ---------------------------------------------------------------------------

/// A section as submitted by the authoring client.
///
/// Any `sortOrder` the client sends is ignored; order is the array order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub content: Vec<ContentInput>,
}

/// A content item as submitted by the authoring client.
///
/// Clients may send several payload fields (e.g. left over from switching an
/// item's type in the editor). Only the one matching `content_type` survives
/// normalisation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentInput {
    pub content_type: ContentType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub is_preview: bool,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub resources: Option<Vec<Resource>>,
    #[serde(default)]
    pub notes: Option<Vec<Note>>,
    #[serde(default)]
    pub video: Option<VideoPayload>,
    #[serde(default)]
    pub video_slide_mashup: Option<VideoSlideMashupPayload>,
    #[serde(default)]
    pub article: Option<ArticlePayload>,
    #[serde(default)]
    pub quiz: Option<QuizPayload>,
    #[serde(default)]
    pub coding_exercise: Option<CodingExercisePayload>,
    #[serde(default)]
    pub assignment: Option<AssignmentPayload>,
    #[serde(default)]
    pub document: Option<DocumentPayload>,
}

impl ContentInput {
    /// Take the payload matching `content_type`, discarding the rest.
    fn take_payload(&mut self) -> ContentPayload {
        match self.content_type {
            ContentType::Video => ContentPayload::Video {
                video: self.video.take().unwrap_or_default(),
            },
            ContentType::VideoSlideMashup => ContentPayload::VideoSlideMashup {
                video_slide_mashup: self.video_slide_mashup.take().unwrap_or_default(),
            },
            ContentType::Article => ContentPayload::Article {
                article: self.article.take().unwrap_or_default(),
            },
            ContentType::Quiz => ContentPayload::Quiz {
                quiz: self.quiz.take().unwrap_or_default(),
            },
            ContentType::CodingExercise => ContentPayload::CodingExercise {
                coding_exercise: self.coding_exercise.take().unwrap_or_default(),
            },
            ContentType::Assignment => ContentPayload::Assignment {
                assignment: self.assignment.take().unwrap_or_default(),
            },
            ContentType::Document => ContentPayload::Document {
                document: self.document.take().unwrap_or_default(),
            },
        }
    }

    fn into_content(mut self, sort_order: u32) -> Content {
        let payload = self.take_payload();
        Content {
            title: self.title.trim().to_string(),
            description: self.description,
            duration: self.duration,
            is_preview: self.is_preview,
            is_free: self.is_free,
            sort_order,
            resources: self.resources.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            payload,
        }
    }
}

/// Normalise a submitted curriculum into the persisted section tree.
///
/// - `sortOrder` of sections and of each section's content is renumbered
///   densely from the array position (0..n-1).
/// - Only the payload matching each item's `contentType` is kept.
/// - Section analytics are recomputed from the content list.
///
/// Blank section or content titles are rejected; every offending position is
/// reported.
pub fn normalize_curriculum(input: Vec<SectionInput>) -> Result<Vec<Section>, CoreError> {
    let mut errors = Vec::new();
    for (si, section) in input.iter().enumerate() {
        if section.title.trim().is_empty() {
            errors.push(format!("Section {} must have a title", si + 1));
        }
        for (ci, item) in section.content.iter().enumerate() {
            if item.title.trim().is_empty() {
                errors.push(format!(
                    "Content item {} in section {} must have a title",
                    ci + 1,
                    si + 1
                ));
            }
        }
    }
    if !errors.is_empty() {
        return Err(CoreError::InvalidFields(errors));
    }

    let sections = input
        .into_iter()
        .zip(0u32..)
        .map(|(section, sort_order)| {
            let content: Vec<Content> = section
                .content
                .into_iter()
                .zip(0u32..)
                .map(|(item, idx)| item.into_content(idx))
                .collect();
            let analytics = SectionAnalytics {
                total_duration: content.iter().map(|c| i64::from(c.duration)).sum(),
                content_count: content.len() as i32,
            };
            Section {
                title: section.title.trim().to_string(),
                description: section.description,
                sort_order,
                is_published: section.is_published,
                content,
                analytics,
            }
        })
        .collect();

    Ok(sections)
}

// ---------------------------------------------------------------------------
// Read view
// ---------------------------------------------------------------------------

/// How much of a curriculum the caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentAccess {
    /// Owner or admin: everything, including unpublished sections.
    Full,
    /// Enrolled student: published sections, all items unlocked.
    Enrolled,
    /// Anyone else: published sections, only preview items unlocked.
    Visitor,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentView {
    #[serde(flatten)]
    pub content: Content,
    pub is_locked: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    pub title: String,
    pub description: Option<String>,
    pub sort_order: u32,
    pub is_published: bool,
    pub analytics: SectionAnalytics,
    pub content: Vec<ContentView>,
}

/// Build the curriculum as seen by a caller with the given access.
pub fn curriculum_view(sections: &[Section], access: ContentAccess) -> Vec<SectionView> {
    sections
        .iter()
        .filter(|s| access == ContentAccess::Full || s.is_published)
        .map(|s| SectionView {
            title: s.title.clone(),
            description: s.description.clone(),
            sort_order: s.sort_order,
            is_published: s.is_published,
            analytics: s.analytics,
            content: s
                .content
                .iter()
                .map(|c| {
                    let locked = access == ContentAccess::Visitor && !c.is_preview;
                    ContentView {
                        content: if locked { c.redacted() } else { c.clone() },
                        is_locked: locked,
                    }
                })
                .collect(),
        })
        .collect()
}
