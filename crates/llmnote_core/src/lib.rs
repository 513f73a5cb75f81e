//! Core read side of the LLM note organizer.
//! Projects hold notes; notes point at a source, a topic and any number of tags.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::catalog::{NoteTag, Source, SourceId, Tag, TagId, Topic, TopicId};
pub use model::note::{Note, NoteId, NoteWithRefs, TaggedNote};
pub use model::project::{Project, ProjectId, ProjectSummary};
pub use repo::organizer_repo::{
    CatalogRepository, NoteListQuery, NoteOrder, NoteRepository, OrganizerStore,
    ProjectListQuery, ProjectRepository, RepoError, RepoResult,
};
pub use repo::sqlite_store::SqliteStore;
pub use service::load_error::{LoadError, LoadStage, PartialFailure};
pub use service::project_detail::{ProjectDetail, ProjectDetailLoader};
pub use service::project_summary::{ProjectSummaries, ProjectSummaryLoader};
pub use service::tag_join::attach_tags;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
