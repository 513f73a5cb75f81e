//! Label catalogs (sources, topics, tags) and the note/tag junction row.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::note::NoteId;

pub type SourceId = Uuid;
pub type TopicId = Uuid;
pub type TagId = Uuid;

/// Attribution label for the origin of a note, usually an LLM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: SourceId,
    pub name: String,
}

/// Classification label for a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
}

/// Free-form label; many-to-many with notes through [`NoteTag`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// One note/tag association from the `note_tags` junction table.
///
/// Storage gives no ordering guarantee and may hold duplicates or rows whose
/// `tag_id` no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteTag {
    pub note_id: NoteId,
    pub tag_id: TagId,
}
