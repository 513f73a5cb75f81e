//! SQLite implementation of the organizer store.
//!
//! # Responsibility
//! - Serve project, note, catalog and junction queries from one connection.
//! - Resolve note sources/topics inline with `LEFT JOIN`s.
//!
//! # Invariants
//! - The connection mutex is only held inside synchronous helpers, never
//!   across an await point.
//! - Persisted ids must parse as UUIDs; malformed rows surface as
//!   `RepoError::InvalidData` instead of being skipped.

use crate::db::{open_db, open_db_in_memory};
use crate::model::catalog::{NoteTag, Source, Tag, Topic};
use crate::model::note::{Note, NoteId, NoteWithRefs};
use crate::model::project::{Project, ProjectId};
use crate::repo::organizer_repo::{
    CatalogRepository, NoteListQuery, NoteOrder, NoteRepository, ProjectListQuery,
    ProjectRepository, RepoError, RepoResult,
};
use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::path::Path;
use std::sync::Mutex;
use uuid::Uuid;

/// Keeps `IN (...)` lists well under SQLite's bound-parameter limit.
const NOTE_TAG_CHUNK_SIZE: usize = 500;

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    created_at,
    updated_at,
    is_archived
FROM projects";

const NOTE_WITH_REFS_SELECT_SQL: &str = "SELECT
    n.id,
    n.project_id,
    n.content,
    n.llm_source_id,
    n.topic_id,
    n.created_at,
    n.updated_at,
    s.id AS source_ref_id,
    s.name AS source_name,
    t.id AS topic_ref_id,
    t.name AS topic_name
FROM notes n
LEFT JOIN llm_sources s ON s.id = n.llm_source_id
LEFT JOIN topics t ON t.id = n.topic_id";

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    (
        "projects",
        &[
            "id",
            "title",
            "description",
            "created_at",
            "updated_at",
            "is_archived",
        ],
    ),
    (
        "notes",
        &[
            "id",
            "project_id",
            "content",
            "llm_source_id",
            "topic_id",
            "created_at",
            "updated_at",
        ],
    ),
    ("llm_sources", &["id", "name"]),
    ("topics", &["id", "name"]),
    ("tags", &["id", "name"]),
    ("note_tags", &["note_id", "tag_id"]),
];

/// SQLite-backed organizer store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Wraps a migrated connection after checking the required schema.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        ensure_store_schema_ready(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_new(open_db(path)?)
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> RepoResult<T>) -> RepoResult<T> {
        let conn = self.conn.lock().map_err(|_| RepoError::LockPoisoned)?;
        f(&conn)
    }
}

#[async_trait]
impl ProjectRepository for SqliteStore {
    async fn list_projects(&self, query: &ProjectListQuery) -> RepoResult<Vec<Project>> {
        let mut sql = String::from(PROJECT_SELECT_SQL);
        if !query.include_archived {
            sql.push_str(" WHERE is_archived = 0");
        }
        sql.push_str(" ORDER BY updated_at DESC;");

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query([])?;
            let mut projects = Vec::new();
            while let Some(row) = rows.next()? {
                projects.push(project_from_row(row)?);
            }
            Ok(projects)
        })
    }

    async fn get_project(&self, project_id: ProjectId) -> RepoResult<Option<Project>> {
        let sql = format!("{PROJECT_SELECT_SQL} WHERE id = ?1;");
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query([project_id.to_string()])?;
            let project = match rows.next()? {
                Some(row) => Some(project_from_row(row)?),
                None => None,
            };
            Ok(project)
        })
    }
}

#[async_trait]
impl NoteRepository for SqliteStore {
    async fn list_notes(&self, query: &NoteListQuery) -> RepoResult<Vec<NoteWithRefs>> {
        let mut sql = format!("{NOTE_WITH_REFS_SELECT_SQL} WHERE n.project_id = ?");
        let mut bind_values = vec![Value::Text(query.project_id.to_string())];

        match query.order {
            NoteOrder::CreatedAtDesc => sql.push_str(" ORDER BY n.created_at DESC"),
            NoteOrder::UpdatedAtDesc => sql.push_str(" ORDER BY n.updated_at DESC, n.id ASC"),
        }
        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(bind_values))?;
            let mut notes = Vec::new();
            while let Some(row) = rows.next()? {
                notes.push(note_with_refs_from_row(row)?);
            }
            Ok(notes)
        })
    }

    async fn list_note_tags(&self, note_ids: &[NoteId]) -> RepoResult<Vec<NoteTag>> {
        if note_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.with_conn(|conn| {
            let mut note_tags = Vec::new();
            for chunk in note_ids.chunks(NOTE_TAG_CHUNK_SIZE) {
                let placeholders = vec!["?"; chunk.len()].join(", ");
                let sql = format!(
                    "SELECT note_id, tag_id FROM note_tags WHERE note_id IN ({placeholders});"
                );
                let mut stmt = conn.prepare(&sql)?;
                let mut rows =
                    stmt.query(params_from_iter(chunk.iter().map(|id| id.to_string())))?;
                while let Some(row) = rows.next()? {
                    note_tags.push(NoteTag {
                        note_id: uuid_column(row, "note_tags", "note_id")?,
                        tag_id: uuid_column(row, "note_tags", "tag_id")?,
                    });
                }
            }
            Ok(note_tags)
        })
    }
}

#[async_trait]
impl CatalogRepository for SqliteStore {
    async fn list_sources(&self) -> RepoResult<Vec<Source>> {
        self.with_conn(|conn| {
            list_labels(conn, "llm_sources", |id, name| Source { id, name })
        })
    }

    async fn list_topics(&self) -> RepoResult<Vec<Topic>> {
        self.with_conn(|conn| list_labels(conn, "topics", |id, name| Topic { id, name }))
    }

    async fn list_tags(&self) -> RepoResult<Vec<Tag>> {
        self.with_conn(|conn| list_labels(conn, "tags", |id, name| Tag { id, name }))
    }
}

/// Reads an `(id, name)` catalog table ordered by name.
fn list_labels<T>(
    conn: &Connection,
    table: &'static str,
    build: impl Fn(Uuid, String) -> T,
) -> RepoResult<Vec<T>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, name FROM {table} ORDER BY name ASC, id ASC;"
    ))?;
    let mut rows = stmt.query([])?;
    let mut labels = Vec::new();
    while let Some(row) = rows.next()? {
        let id = uuid_column(row, table, "id")?;
        labels.push(build(id, row.get("name")?));
    }
    Ok(labels)
}

fn project_from_row(row: &Row<'_>) -> RepoResult<Project> {
    let is_archived: i64 = row.get("is_archived")?;
    Ok(Project {
        id: uuid_column(row, "projects", "id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        is_archived: is_archived != 0,
    })
}

fn note_with_refs_from_row(row: &Row<'_>) -> RepoResult<NoteWithRefs> {
    let note = Note {
        id: uuid_column(row, "notes", "id")?,
        project_id: uuid_column(row, "notes", "project_id")?,
        content: row.get("content")?,
        llm_source_id: optional_uuid_column(row, "notes", "llm_source_id")?,
        topic_id: optional_uuid_column(row, "notes", "topic_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };

    let source = match optional_uuid_column(row, "llm_sources", "source_ref_id")? {
        Some(id) => Some(Source {
            id,
            name: row.get("source_name")?,
        }),
        None => None,
    };
    let topic = match optional_uuid_column(row, "topics", "topic_ref_id")? {
        Some(id) => Some(Topic {
            id,
            name: row.get("topic_name")?,
        }),
        None => None,
    };

    Ok(NoteWithRefs {
        note,
        source,
        topic,
    })
}

fn uuid_column(row: &Row<'_>, table: &str, column: &str) -> RepoResult<Uuid> {
    let value: String = row.get(column)?;
    parse_uuid(&value, table, column)
}

fn optional_uuid_column(row: &Row<'_>, table: &str, column: &str) -> RepoResult<Option<Uuid>> {
    let value: Option<String> = row.get(column)?;
    value
        .map(|value| parse_uuid(&value, table, column))
        .transpose()
}

fn parse_uuid(value: &str, table: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{value}` in {table}.{column}"))
    })
}

fn ensure_store_schema_ready(conn: &Connection) -> RepoResult<()> {
    for &(table, columns) in REQUIRED_COLUMNS {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
