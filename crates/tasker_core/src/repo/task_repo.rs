//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the four data-access operations every command relies on:
//!   create, find-by-id, list-all, mark-done.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `get_task` resolves zero rows to `Ok(None)`; a missing id is never
//!   reported as a zero-valued task.
//! - `mark_done` refreshes `completed_at` even when the task is already
//!   done; the not-already-done check lives in the service workflow.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::task::{NewTask, Task, TaskId};
use chrono::{Local, NaiveDateTime};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    done,
    created_at,
    completed_at
FROM tasks";

/// Persisted timestamp layout. Fractional seconds are kept in storage so a
/// repeated done-transition within the same second is still observable.
const STORED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(TaskId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for task lifecycle operations.
pub trait TaskRepository {
    /// Inserts a new not-done task and returns the storage-assigned id.
    /// Empty titles are accepted; storage enforces the only constraints.
    fn create_task(&self, task: &NewTask) -> RepoResult<TaskId>;

    /// Returns the task with the given id, or `None` when no row matches.
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;

    /// Returns every task in insertion order. Empty store yields an empty
    /// vec, not an error.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;

    /// Sets `done = true` and `completed_at = now`, unconditionally, and
    /// returns the updated row. Fails with `NotFound` when the id does not
    /// exist.
    fn mark_done(&self, id: TaskId) -> RepoResult<Task>;
}

/// SQLite-backed task repository over a borrowed process-lifetime connection.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &NewTask) -> RepoResult<TaskId> {
        let created_at = Local::now().naive_local();

        self.conn.execute(
            "INSERT INTO tasks (title, description, done, created_at, completed_at)
             VALUES (?1, ?2, 0, ?3, NULL);",
            params![
                task.title.as_str(),
                task.description.as_str(),
                datetime_to_db(created_at),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn mark_done(&self, id: TaskId) -> RepoResult<Task> {
        let completed_at = Local::now().naive_local();

        let changed = self.conn.execute(
            "UPDATE tasks
             SET done = 1, completed_at = ?1
             WHERE id = ?2;",
            params![datetime_to_db(completed_at), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        match self.get_task(id)? {
            Some(task) => Ok(task),
            None => Err(RepoError::NotFound(id)),
        }
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let done = match row.get::<_, i64>("done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid done value `{other}` in tasks.done"
            )));
        }
    };

    let created_at_text: String = row.get("created_at")?;
    let created_at = parse_db_datetime(&created_at_text, "created_at")?;

    let completed_at = match row.get::<_, Option<String>>("completed_at")? {
        Some(text) => Some(parse_db_datetime(&text, "completed_at")?),
        None => None,
    };

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        done,
        created_at,
        completed_at,
    })
}

fn datetime_to_db(value: NaiveDateTime) -> String {
    value.format(STORED_TIMESTAMP_FORMAT).to_string()
}

fn parse_db_datetime(value: &str, column: &str) -> RepoResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, STORED_TIMESTAMP_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid timestamp `{value}` in tasks.{column}"))
    })
}
