//! Storage contracts for the organizer read side.
//!
//! # Responsibility
//! - Express the query capability the loaders need: equality filters,
//!   set-membership filters, ordering, limits and inline selection of
//!   referenced sources/topics.
//! - Keep loaders independent from the concrete store.
//!
//! # Invariants
//! - Project lists are ordered by `updated_at DESC`.
//! - Catalog lists (sources, topics, tags) are ordered by `name ASC`.
//! - `list_note_tags` with an empty id set returns an empty list.

use crate::db::DbError;
use crate::model::catalog::{NoteTag, Source, Tag, Topic};
use crate::model::note::{NoteId, NoteWithRefs};
use crate::model::project::{Project, ProjectId};
use async_trait::async_trait;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error raised by store implementations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
    #[error("missing required table `{0}`")]
    MissingRequiredTable(&'static str),
    #[error("missing required column `{table}.{column}`")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("store connection lock poisoned")]
    LockPoisoned,
    /// Failure reported by a non-SQLite backend.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing projects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectListQuery {
    /// When `false`, only rows with `is_archived = false` are returned.
    pub include_archived: bool,
}

impl ProjectListQuery {
    pub fn active() -> Self {
        Self {
            include_archived: false,
        }
    }
}

/// Sort key for note lists. Both orders are descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteOrder {
    /// Newest created first. Ties keep storage order.
    CreatedAtDesc,
    /// Most recently updated first, ties broken by id.
    UpdatedAtDesc,
}

/// Query options for listing the notes of one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteListQuery {
    pub project_id: ProjectId,
    pub order: NoteOrder,
    /// `None` returns every matching note.
    pub limit: Option<u32>,
}

impl NoteListQuery {
    /// The single newest note of a project.
    pub fn most_recent(project_id: ProjectId) -> Self {
        Self {
            project_id,
            order: NoteOrder::CreatedAtDesc,
            limit: Some(1),
        }
    }

    /// All notes of a project, most recently updated first.
    pub fn recently_updated(project_id: ProjectId) -> Self {
        Self {
            project_id,
            order: NoteOrder::UpdatedAtDesc,
            limit: None,
        }
    }
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Lists projects ordered by `updated_at DESC`.
    async fn list_projects(&self, query: &ProjectListQuery) -> RepoResult<Vec<Project>>;
    /// Gets one project by exact id.
    async fn get_project(&self, project_id: ProjectId) -> RepoResult<Option<Project>>;
}

#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Lists notes of one project with source and topic selected inline.
    async fn list_notes(&self, query: &NoteListQuery) -> RepoResult<Vec<NoteWithRefs>>;
    /// Lists junction rows whose `note_id` is in `note_ids`.
    async fn list_note_tags(&self, note_ids: &[NoteId]) -> RepoResult<Vec<NoteTag>>;
}

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_sources(&self) -> RepoResult<Vec<Source>>;
    async fn list_topics(&self) -> RepoResult<Vec<Topic>>;
    async fn list_tags(&self) -> RepoResult<Vec<Tag>>;
}

/// Everything the loaders read from.
pub trait OrganizerStore: ProjectRepository + NoteRepository + CatalogRepository {}

impl<T: ProjectRepository + NoteRepository + CatalogRepository + ?Sized> OrganizerStore for T {}
