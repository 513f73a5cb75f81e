//! Shared fixtures: SQL seeding and a fault-injecting store wrapper.
#![allow(dead_code)]

use async_trait::async_trait;
use llmnote_core::db::open_db_in_memory;
use llmnote_core::{
    CatalogRepository, NoteId, NoteListQuery, NoteRepository, NoteTag, NoteWithRefs, Project,
    ProjectId, ProjectListQuery, ProjectRepository, RepoError, RepoResult, Source, SourceId,
    SqliteStore, Tag, TagId, Topic, TopicId,
};
use rusqlite::{params, Connection};
use std::sync::Mutex;
use uuid::Uuid;

/// Writes rows straight into a migrated in-memory database.
pub struct Seed {
    conn: Connection,
}

impl Seed {
    pub fn new() -> Self {
        Self {
            conn: open_db_in_memory().unwrap(),
        }
    }

    pub fn project(&self, title: &str, updated_at: i64, is_archived: bool) -> ProjectId {
        let id = Uuid::new_v4();
        self.conn
            .execute(
                "INSERT INTO projects (id, title, description, created_at, updated_at, is_archived)
                 VALUES (?1, ?2, NULL, 0, ?3, ?4);",
                params![id.to_string(), title, updated_at, is_archived],
            )
            .unwrap();
        id
    }

    pub fn source(&self, name: &str) -> SourceId {
        self.label("llm_sources", name)
    }

    pub fn topic(&self, name: &str) -> TopicId {
        self.label("topics", name)
    }

    pub fn tag(&self, name: &str) -> TagId {
        self.label("tags", name)
    }

    pub fn note(&self, project_id: ProjectId, created_at: i64, updated_at: i64) -> NoteId {
        self.note_with_refs(project_id, created_at, updated_at, None, None)
    }

    pub fn note_with_refs(
        &self,
        project_id: ProjectId,
        created_at: i64,
        updated_at: i64,
        source_id: Option<SourceId>,
        topic_id: Option<TopicId>,
    ) -> NoteId {
        let id = Uuid::new_v4();
        self.conn
            .execute(
                "INSERT INTO notes
                    (id, project_id, content, llm_source_id, topic_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    id.to_string(),
                    project_id.to_string(),
                    format!("note created at {created_at}"),
                    source_id.map(|id| id.to_string()),
                    topic_id.map(|id| id.to_string()),
                    created_at,
                    updated_at,
                ],
            )
            .unwrap();
        id
    }

    pub fn link(&self, note_id: NoteId, tag_id: TagId) {
        self.conn
            .execute(
                "INSERT INTO note_tags (note_id, tag_id) VALUES (?1, ?2);",
                params![note_id.to_string(), tag_id.to_string()],
            )
            .unwrap();
    }

    pub fn into_store(self) -> SqliteStore {
        SqliteStore::try_new(self.conn).unwrap()
    }

    fn label(&self, table: &str, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.conn
            .execute(
                &format!("INSERT INTO {table} (id, name) VALUES (?1, ?2);"),
                params![id.to_string(), name],
            )
            .unwrap();
        id
    }
}

/// Which query the [`FaultyStore`] should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    ProjectList,
    ProjectFetch,
    RecentNoteOf(ProjectId),
    Notes,
    Sources,
    Topics,
    Tags,
    NoteTags,
}

/// Delegates to a real store, failing the queries named by its faults.
pub struct FaultyStore {
    inner: SqliteStore,
    faults: Vec<Fault>,
    note_tag_requests: Mutex<Vec<usize>>,
}

impl FaultyStore {
    pub fn new(inner: SqliteStore, faults: &[Fault]) -> Self {
        Self {
            inner,
            faults: faults.to_vec(),
            note_tag_requests: Mutex::new(Vec::new()),
        }
    }

    /// Sizes of the id sets passed to `list_note_tags`, in call order.
    pub fn note_tag_requests(&self) -> Vec<usize> {
        self.note_tag_requests.lock().unwrap().clone()
    }

    fn check(&self, fault: Fault) -> RepoResult<()> {
        if self.faults.contains(&fault) {
            return Err(RepoError::Unavailable(format!("injected {fault:?}")));
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for FaultyStore {
    async fn list_projects(&self, query: &ProjectListQuery) -> RepoResult<Vec<Project>> {
        self.check(Fault::ProjectList)?;
        self.inner.list_projects(query).await
    }

    async fn get_project(&self, project_id: ProjectId) -> RepoResult<Option<Project>> {
        self.check(Fault::ProjectFetch)?;
        self.inner.get_project(project_id).await
    }
}

#[async_trait]
impl NoteRepository for FaultyStore {
    async fn list_notes(&self, query: &NoteListQuery) -> RepoResult<Vec<NoteWithRefs>> {
        match query.limit {
            Some(_) => self.check(Fault::RecentNoteOf(query.project_id))?,
            None => self.check(Fault::Notes)?,
        }
        self.inner.list_notes(query).await
    }

    async fn list_note_tags(&self, note_ids: &[NoteId]) -> RepoResult<Vec<NoteTag>> {
        self.note_tag_requests.lock().unwrap().push(note_ids.len());
        self.check(Fault::NoteTags)?;
        self.inner.list_note_tags(note_ids).await
    }
}

#[async_trait]
impl CatalogRepository for FaultyStore {
    async fn list_sources(&self) -> RepoResult<Vec<Source>> {
        self.check(Fault::Sources)?;
        self.inner.list_sources().await
    }

    async fn list_topics(&self) -> RepoResult<Vec<Topic>> {
        self.check(Fault::Topics)?;
        self.inner.list_topics().await
    }

    async fn list_tags(&self) -> RepoResult<Vec<Tag>> {
        self.check(Fault::Tags)?;
        self.inner.list_tags().await
    }
}
