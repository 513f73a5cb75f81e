//! Failure taxonomy shared by the project loaders.
//!
//! # Invariants
//! - `Display` is the user-facing message and never includes storage detail.
//! - The storage error, when there is one, is kept as `source()` for logs.

use crate::model::project::ProjectId;
use crate::repo::organizer_repo::RepoError;
use serde::{Deserialize, Serialize};
use std::error::Error as _;
use thiserror::Error;

/// Fetch step that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStage {
    /// Active project list of the summary loader.
    Projects,
    /// Per-project newest note of the summary loader.
    RecentNote,
    Notes,
    Sources,
    Topics,
    Tags,
    NoteTags,
}

impl LoadStage {
    /// Stable token used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::RecentNote => "recent_note",
            Self::Notes => "notes",
            Self::Sources => "sources",
            Self::Topics => "topics",
            Self::Tags => "tags",
            Self::NoteTags => "note_tags",
        }
    }

    fn subject(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::RecentNote => "recent note",
            Self::Notes => "notes",
            Self::Sources => "LLM sources",
            Self::Topics => "topics",
            Self::Tags => "tags",
            Self::NoteTags => "note tags",
        }
    }
}

/// Fatal loader failure. No partial data accompanies it.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The requested project does not exist (or could not be read at all).
    #[error("Project not found")]
    NotFound {
        #[source]
        source: Option<RepoError>,
    },
    /// A dependent fetch failed.
    #[error("Failed to load {}", .stage.subject())]
    LoadFailure {
        stage: LoadStage,
        #[source]
        source: RepoError,
    },
}

impl LoadError {
    pub fn not_found() -> Self {
        Self::NotFound { source: None }
    }

    pub fn stage(&self) -> Option<LoadStage> {
        match self {
            Self::NotFound { .. } => None,
            Self::LoadFailure { stage, .. } => Some(*stage),
        }
    }

    /// HTTP-equivalent status for the presentation boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::LoadFailure { .. } => 500,
        }
    }

    /// Generic message safe to show to end users.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Stable token used in log lines.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { source: None } => "project_missing",
            Self::NotFound { source: Some(_) } => "project_fetch_failed",
            Self::LoadFailure { .. } => "load_failed",
        }
    }

    /// Server-side text: user message plus the underlying storage error.
    pub fn diagnostic(&self) -> String {
        match self.source() {
            Some(source) => format!("{self}: {source}"),
            None => self.to_string(),
        }
    }
}

/// Isolated summary failure: one project's recent note could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialFailure {
    pub project_id: ProjectId,
    pub stage: LoadStage,
}
