//! Project record and the summary projection built on top of it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::note::NoteWithRefs;

/// Stable identifier of a project.
pub type ProjectId = Uuid;

/// Project as stored in the `projects` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Drives the summary list order.
    pub updated_at: i64,
    /// Archived projects are hidden from the summary list.
    pub is_archived: bool,
}

/// One row of the project summary list.
///
/// Serializes as the flattened project fields plus `recentNote`, which is
/// `null` when the project has no notes or its note fetch failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: Project,
    #[serde(rename = "recentNote")]
    pub recent_note: Option<NoteWithRefs>,
}
