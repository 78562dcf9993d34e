//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `tasks` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `update` is read-merge-write inside one transaction.

use crate::db::{DbError, DbHandle};
use crate::model::task::{now_epoch_ms, NewTask, Task, TaskId, TaskPatch, TaskValidationError};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    text,
    completed,
    created_at,
    updated_at
FROM tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    NotFound(TaskId),
    InvalidData(String),
    /// Backend failure outside SQLite, carrying the raw backend message.
    Storage(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "Todo with id {id} not found"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::Storage(message) => write!(f, "{message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) | Self::Storage(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
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

/// Record store contract for tasks.
pub trait TaskRepository {
    /// Every stored task in insertion order.
    fn list_all(&self) -> RepoResult<Vec<Task>>;
    /// Point lookup; a missing id is `Ok(None)`.
    fn get_by_id(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn insert(&self, task: &NewTask) -> RepoResult<TaskId>;
    /// Merges `patch` onto an existing task; `NotFound` when absent.
    fn update(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<()>;
    /// Deletes one task. Deleting a missing id is not an error.
    fn remove(&self, id: TaskId) -> RepoResult<()>;
    fn clear(&self) -> RepoResult<()>;
}

/// SQLite-backed task repository over a lazily opened handle.
pub struct SqliteTaskRepository<'h> {
    handle: &'h DbHandle,
}

impl<'h> SqliteTaskRepository<'h> {
    pub fn new(handle: &'h DbHandle) -> Self {
        Self { handle }
    }

    fn conn(&self) -> RepoResult<&'h Connection> {
        Ok(self.handle.connection()?)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn list_all(&self) -> RepoResult<Vec<Task>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{TASK_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn get_by_id(&self, id: TaskId) -> RepoResult<Option<Task>> {
        load_task(self.conn()?, id)
    }

    fn insert(&self, task: &NewTask) -> RepoResult<TaskId> {
        task.validate()?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO tasks (
                text,
                completed,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                task.text.as_str(),
                bool_to_int(task.completed),
                task.created_at,
                task.updated_at,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!("event=task_insert module=repo status=ok id={id}");
        Ok(id)
    }

    fn update(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<()> {
        let conn = self.conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut task = load_task(&tx, id)?.ok_or(RepoError::NotFound(id))?;
        task.apply_patch(patch, now_epoch_ms());
        task.validate()?;

        tx.execute(
            "UPDATE tasks
             SET
                text = ?1,
                completed = ?2,
                updated_at = ?3
             WHERE id = ?4;",
            params![
                task.text.as_str(),
                bool_to_int(task.completed),
                task.updated_at,
                id,
            ],
        )?;
        tx.commit()?;

        debug!(
            "event=task_update module=repo status=ok id={id} updated_at={}",
            task.updated_at
        );
        Ok(())
    }

    fn remove(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn()?
            .execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
        debug!("event=task_remove module=repo status=ok id={id} changed={changed}");
        Ok(())
    }

    fn clear(&self) -> RepoResult<()> {
        let changed = self.conn()?.execute("DELETE FROM tasks;", [])?;
        debug!("event=task_clear module=repo status=ok changed={changed}");
        Ok(())
    }
}

fn load_task(conn: &Connection, id: TaskId) -> RepoResult<Option<Task>> {
    let mut stmt = conn.prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
    let row = stmt
        .query_row([id], |row| Ok(parse_task_row(row)))
        .optional()?;
    row.transpose()
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    let task = Task {
        id: row.get("id")?,
        text: row.get("text")?,
        completed,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    task.validate().map_err(|err| {
        RepoError::InvalidData(format!("task {} failed validation: {err}", task.id))
    })?;
    Ok(task)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
