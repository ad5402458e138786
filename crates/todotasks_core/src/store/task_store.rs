//! Task store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide durable CRUD over the `tasks` table.
//! - Publish the full current collection to observers after every mutation.
//!
//! # Invariants
//! - Assigned ids are unique for all time within a database; deletion never
//!   frees an id for reuse (`AUTOINCREMENT`).
//! - Update/delete against a missing id is a silent no-op, not an error.
//! - Emission order is primary-key ascending and stable between mutations.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::task::{Task, TaskId};
use log::{debug, error};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::sync::watch;

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    is_completed
FROM tasks";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error surface of the persistence boundary.
///
/// `Db` and `Unavailable` are the "storage medium failed" cases; the
/// remaining variants reject misconfigured connections or corrupt rows.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Unavailable(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(details) => write!(f, "storage unavailable: {details}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{column}` on table `{table}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence contract for the task collection.
///
/// One production implementation ([`SqliteTaskStore`]) and one in-memory
/// fixture ([`crate::store::memory::MemoryTaskStore`]) for tests.
pub trait TaskStore {
    /// Returns a receiver that holds the current snapshot immediately and is
    /// notified with the full updated collection after every mutation.
    fn subscribe(&self) -> watch::Receiver<Vec<Task>>;
    /// Point lookup; a missing id is `Ok(None)`, not an error.
    fn get_by_id(&self, id: TaskId) -> StoreResult<Option<Task>>;
    /// Persists a new task and returns the store-assigned id. Any id already
    /// set on the input is ignored.
    fn insert(&self, task: &Task) -> StoreResult<TaskId>;
    /// Replaces the stored record matching the task's id. No-op when no
    /// record matches or the task carries no id.
    fn update(&self, task: &Task) -> StoreResult<()>;
    /// Removes the record matching the task's id. No-op when absent.
    fn delete(&self, task: &Task) -> StoreResult<()>;
}

/// SQLite-backed task store.
pub struct SqliteTaskStore {
    conn: Connection,
    tasks_tx: watch::Sender<Vec<Task>>,
}

impl SqliteTaskStore {
    /// Constructs a store from a migrated/ready connection and seeds the
    /// observation stream with the current collection.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        ensure_connection_ready(&conn)?;
        let initial = load_all(&conn)?;
        let (tasks_tx, _) = watch::channel(initial);
        Ok(Self { conn, tasks_tx })
    }

    /// Reloads the collection and pushes it to all subscribers.
    ///
    /// A failed reload publishes an empty collection: observers see a defined
    /// recovery state rather than a dead subscription.
    fn publish(&self) {
        match load_all(&self.conn) {
            Ok(tasks) => {
                self.tasks_tx.send_replace(tasks);
            }
            Err(err) => {
                error!(
                    "event=task_publish module=store status=error error_code=snapshot_reload_failed error={err}"
                );
                self.tasks_tx.send_replace(Vec::new());
            }
        }
    }
}

impl TaskStore for SqliteTaskStore {
    fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.tasks_tx.subscribe()
    }

    fn get_by_id(&self, id: TaskId) -> StoreResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn insert(&self, task: &Task) -> StoreResult<TaskId> {
        self.conn.execute(
            "INSERT INTO tasks (title, description, is_completed)
             VALUES (?1, ?2, ?3);",
            params![
                task.title.as_str(),
                task.description.as_deref(),
                bool_to_int(task.is_completed),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("event=task_insert module=store status=ok id={id}");
        self.publish();
        Ok(id)
    }

    fn update(&self, task: &Task) -> StoreResult<()> {
        let Some(id) = task.id else {
            debug!("event=task_update module=store status=skip reason=missing_id");
            return Ok(());
        };

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                description = ?2,
                is_completed = ?3
             WHERE id = ?4;",
            params![
                task.title.as_str(),
                task.description.as_deref(),
                bool_to_int(task.is_completed),
                id,
            ],
        )?;

        if changed == 0 {
            debug!("event=task_update module=store status=skip reason=not_found id={id}");
        } else {
            debug!("event=task_update module=store status=ok id={id}");
        }

        self.publish();
        Ok(())
    }

    fn delete(&self, task: &Task) -> StoreResult<()> {
        let Some(id) = task.id else {
            debug!("event=task_delete module=store status=skip reason=missing_id");
            return Ok(());
        };

        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id])?;

        if changed == 0 {
            debug!("event=task_delete module=store status=skip reason=not_found id={id}");
        } else {
            debug!("event=task_delete module=store status=ok id={id}");
        }

        self.publish();
        Ok(())
    }
}

fn load_all(conn: &Connection) -> StoreResult<Vec<Task>> {
    let mut stmt = conn.prepare(&format!("{TASK_SELECT_SQL} ORDER BY id ASC;"))?;
    let mut rows = stmt.query([])?;
    let mut tasks = Vec::new();

    while let Some(row) = rows.next()? {
        tasks.push(parse_task_row(row)?);
    }

    Ok(tasks)
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<Task> {
    let is_completed = match row.get::<_, i64>("is_completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid is_completed value `{other}` in tasks.is_completed"
            )));
        }
    };

    Ok(Task {
        id: Some(row.get("id")?),
        title: row.get("title")?,
        description: row.get("description")?,
        is_completed,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "tasks")? {
        return Err(StoreError::MissingRequiredTable("tasks"));
    }

    for column in ["id", "title", "description", "is_completed"] {
        if !table_has_column(conn, "tasks", column)? {
            return Err(StoreError::MissingRequiredColumn {
                table: "tasks",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
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

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
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
