//! Course notes: titled, topic-tagged attachments with an optional file.
//!
//! Notes are stored at course level. A caller may name a section/content
//! position when adding one, but that position is not used for addressing:
//! the note still lands in the course's general notes list.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::Timestamp;

/// A reference to a file uploaded elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    #[validate(url(message = "must be a valid URL"))]
    pub url: String,
    pub name: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Random identifier, unique within the owning course.
    pub id: String,
    pub title: String,
    pub topic: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file: Option<FileRef>,
    #[serde(default)]
    pub is_downloadable: bool,
    pub created_at: Timestamp,
}

/// Request body for adding a note to a course.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NoteInput {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub topic: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub file: Option<FileRef>,
    #[serde(default)]
    pub is_downloadable: bool,
    /// Accepted for compatibility with per-item note clients; ignored.
    #[serde(default)]
    pub section_index: Option<u32>,
    #[serde(default)]
    pub content_index: Option<u32>,
}

impl NoteInput {
    /// Trim, validate and turn the input into a course-level note.
    pub fn into_note(mut self, id: String, created_at: Timestamp) -> Result<Note, CoreError> {
        self.title = self.title.trim().to_string();
        self.topic = self.topic.trim().to_string();
        self.validate()?;
        Ok(Note {
            id,
            title: self.title,
            topic: self.topic,
            description: self.description,
            file: self.file,
            is_downloadable: self.is_downloadable,
            created_at,
        })
    }

    /// Whether the caller asked for a per-item placement.
    pub fn targets_content_item(&self) -> bool {
        self.section_index.is_some() || self.content_index.is_some()
    }
}
