//! Full view of one project: notes with sources, topics and tags, plus the
//! catalogs the editing UI offers for selection.
//!
//! # Responsibility
//! - Sequence the project, notes, catalog and junction fetches.
//! - Join junction rows onto notes via [`attach_tags`].
//!
//! # Invariants
//! - A missing project is `NotFound`; nothing else is fetched.
//! - Any later fetch failure aborts with `LoadFailure { stage }` and no data.
//! - Every issued fetch runs to completion before failures are reported, and
//!   failures are reported in step order: notes, sources, topics, tags,
//!   note tags.

use crate::model::catalog::{NoteTag, Source, Tag, Topic};
use crate::model::note::{NoteId, NoteWithRefs, TaggedNote};
use crate::model::project::{Project, ProjectId};
use crate::repo::organizer_repo::{NoteListQuery, OrganizerStore, RepoError, RepoResult};
use crate::service::load_error::{LoadError, LoadStage};
use crate::service::tag_join::attach_tags;
use futures::join;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

/// Everything the project page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetail {
    pub project: Project,
    /// Most recently updated first.
    pub notes: Vec<TaggedNote>,
    #[serde(rename = "llmSources")]
    pub sources: Vec<Source>,
    pub topics: Vec<Topic>,
    pub tags: Vec<Tag>,
}

/// Loads [`ProjectDetail`] for one project.
pub struct ProjectDetailLoader<'s, S: OrganizerStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: OrganizerStore + ?Sized> ProjectDetailLoader<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Loads a project by route parameter. A malformed id is `NotFound`.
    pub async fn load_project_detail_str(
        &self,
        project_id: &str,
    ) -> Result<ProjectDetail, LoadError> {
        match Uuid::parse_str(project_id.trim()) {
            Ok(project_id) => self.load_project_detail(project_id).await,
            Err(_) => {
                debug!(
                    "event=project_detail_load module=service status=error error_code=invalid_project_id"
                );
                Err(LoadError::not_found())
            }
        }
    }

    /// Loads a project with its tagged notes and the label catalogs.
    ///
    /// # Errors
    /// - `LoadError::NotFound` when the project cannot be read.
    /// - `LoadError::LoadFailure` naming the first failed stage otherwise.
    ///
    /// # Side effects
    /// - Emits one `project_detail_load` log line with status and duration.
    pub async fn load_project_detail(
        &self,
        project_id: ProjectId,
    ) -> Result<ProjectDetail, LoadError> {
        let started_at = Instant::now();
        let result = self.assemble(project_id).await;

        match &result {
            Ok(detail) => info!(
                "event=project_detail_load module=service status=ok project_id={} notes={} tags={} duration_ms={}",
                project_id,
                detail.notes.len(),
                detail.tags.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=project_detail_load module=service status=error project_id={} stage={} error_code={} duration_ms={} error={}",
                project_id,
                err.stage().map_or("project", LoadStage::as_str),
                err.error_code(),
                started_at.elapsed().as_millis(),
                err.diagnostic()
            ),
        }
        result
    }

    async fn assemble(&self, project_id: ProjectId) -> Result<ProjectDetail, LoadError> {
        let project = match self.store.get_project(project_id).await {
            Ok(Some(project)) => project,
            Ok(None) => return Err(LoadError::not_found()),
            Err(err) => return Err(LoadError::NotFound { source: Some(err) }),
        };

        let (notes_and_links, sources, topics, tags) = join!(
            self.notes_with_links(project_id),
            self.store.list_sources(),
            self.store.list_topics(),
            self.store.list_tags()
        );

        let (notes, note_tags) = notes_and_links.map_err(stage_failure(LoadStage::Notes))?;
        let sources = sources.map_err(stage_failure(LoadStage::Sources))?;
        let topics = topics.map_err(stage_failure(LoadStage::Topics))?;
        let tags = tags.map_err(stage_failure(LoadStage::Tags))?;
        let note_tags = note_tags.map_err(stage_failure(LoadStage::NoteTags))?;

        Ok(ProjectDetail {
            project,
            notes: attach_tags(notes, &note_tags, &tags),
            sources,
            topics,
            tags,
        })
    }

    /// Notes of the project, then the junction rows for exactly those notes.
    ///
    /// The outer error is the notes fetch, the inner one the junction fetch.
    async fn notes_with_links(
        &self,
        project_id: ProjectId,
    ) -> RepoResult<(Vec<NoteWithRefs>, RepoResult<Vec<NoteTag>>)> {
        let notes = self
            .store
            .list_notes(&NoteListQuery::recently_updated(project_id))
            .await?;
        let note_ids: Vec<NoteId> = notes.iter().map(NoteWithRefs::id).collect();
        let note_tags = self.store.list_note_tags(&note_ids).await;
        Ok((notes, note_tags))
    }
}

fn stage_failure(stage: LoadStage) -> impl FnOnce(RepoError) -> LoadError {
    move |source| LoadError::LoadFailure { stage, source }
}
