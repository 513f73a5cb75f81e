//! Project list with each project's newest note.
//!
//! # Responsibility
//! - List active projects and attach one `recentNote` per project.
//!
//! # Invariants
//! - Output order is the project list order (`updated_at DESC`).
//! - A failed project list yields no projects plus `error`; it never returns `Err`.
//! - A failed recent-note fetch only nulls that project's `recentNote`.
//! - Among notes with equal `created_at`, which one is "newest" is up to the
//!   store and not deterministic.

use crate::model::project::{Project, ProjectSummary};
use crate::repo::organizer_repo::{NoteListQuery, OrganizerStore, ProjectListQuery};
use crate::service::load_error::{LoadError, LoadStage, PartialFailure};
use futures::future::join_all;
use log::{error, info};
use std::time::Instant;

/// Outcome of [`ProjectSummaryLoader::load_project_summaries`].
#[derive(Debug, Default)]
pub struct ProjectSummaries {
    pub projects: Vec<ProjectSummary>,
    /// Set when the project list itself could not be fetched.
    pub error: Option<LoadError>,
    /// Projects whose `recentNote` was nulled by a failed fetch.
    pub partial_failures: Vec<PartialFailure>,
}

impl ProjectSummaries {
    fn failed(error: LoadError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// True when neither the list nor any per-project fetch failed.
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.partial_failures.is_empty()
    }
}

/// Loads the project overview.
pub struct ProjectSummaryLoader<'s, S: OrganizerStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: OrganizerStore + ?Sized> ProjectSummaryLoader<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Lists non-archived projects, each with its newest note.
    ///
    /// Recent-note fetches for all projects are issued together and joined.
    ///
    /// # Side effects
    /// - Emits one `error!` line per failed fetch and one summary line.
    pub async fn load_project_summaries(&self) -> ProjectSummaries {
        let started_at = Instant::now();

        let projects = match self.store.list_projects(&ProjectListQuery::active()).await {
            Ok(projects) => projects,
            Err(err) => {
                error!(
                    "event=project_summaries_load module=service status=error stage={} error_code=projects_fetch_failed duration_ms={} error={}",
                    LoadStage::Projects.as_str(),
                    started_at.elapsed().as_millis(),
                    err
                );
                return ProjectSummaries::failed(LoadError::LoadFailure {
                    stage: LoadStage::Projects,
                    source: err,
                });
            }
        };

        let outcomes = join_all(
            projects
                .into_iter()
                .map(|project| self.with_recent_note(project)),
        )
        .await;

        let mut summaries = ProjectSummaries {
            projects: Vec::with_capacity(outcomes.len()),
            ..ProjectSummaries::default()
        };
        for (summary, failure) in outcomes {
            summaries.projects.push(summary);
            summaries.partial_failures.extend(failure);
        }

        info!(
            "event=project_summaries_load module=service status=ok projects={} partial_failures={} duration_ms={}",
            summaries.projects.len(),
            summaries.partial_failures.len(),
            started_at.elapsed().as_millis()
        );
        summaries
    }

    async fn with_recent_note(&self, project: Project) -> (ProjectSummary, Option<PartialFailure>) {
        let query = NoteListQuery::most_recent(project.id);
        match self.store.list_notes(&query).await {
            Ok(notes) => (
                ProjectSummary {
                    project,
                    recent_note: notes.into_iter().next(),
                },
                None,
            ),
            Err(err) => {
                error!(
                    "event=recent_note_fetch module=service status=error project_id={} stage={} error_code=recent_note_fetch_failed error={}",
                    project.id,
                    LoadStage::RecentNote.as_str(),
                    err
                );
                let failure = PartialFailure {
                    project_id: project.id,
                    stage: LoadStage::RecentNote,
                };
                (
                    ProjectSummary {
                        project,
                        recent_note: None,
                    },
                    Some(failure),
                )
            }
        }
    }
}
