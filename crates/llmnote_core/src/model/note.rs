//! Note record and its denormalized read-model shapes.
//!
//! # Invariants
//! - `NoteWithRefs` carries whatever source/topic the stored ids resolve to;
//!   an unset or dangling id resolves to `None`.
//! - `TaggedNote::tags` is never absent: untagged notes carry an empty list.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::catalog::{Source, SourceId, Tag, Topic, TopicId};
use crate::model::project::ProjectId;

/// Stable identifier of a note.
pub type NoteId = Uuid;

/// Note as stored in the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub project_id: ProjectId,
    pub content: String,
    pub llm_source_id: Option<SourceId>,
    pub topic_id: Option<TopicId>,
    /// Unix epoch milliseconds. Picks the "most recent" note of a project.
    pub created_at: i64,
    /// Unix epoch milliseconds. Orders the project detail note list.
    pub updated_at: i64,
}

/// Note with its source and topic selected inline.
///
/// Serialized field names follow the related table names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteWithRefs {
    #[serde(flatten)]
    pub note: Note,
    #[serde(rename = "llm_sources")]
    pub source: Option<Source>,
    #[serde(rename = "topics")]
    pub topic: Option<Topic>,
}

impl NoteWithRefs {
    pub fn id(&self) -> NoteId {
        self.note.id
    }
}

/// Project detail note: inline refs plus the tags joined from `note_tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedNote {
    #[serde(flatten)]
    pub note: NoteWithRefs,
    /// Ordered by tag name (tag catalog order).
    pub tags: Vec<Tag>,
}

impl TaggedNote {
    pub fn id(&self) -> NoteId {
        self.note.id()
    }
}
