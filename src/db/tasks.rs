//! Task CRUD operations.

use super::Database;
use crate::error::{Result, TodoError};
use crate::types::{
    DATE_FORMAT, Task, TaskId, TaskStatus, normalize_description, parse_due_date,
};
use chrono::NaiveDate;
use rusqlite::types::{Type, ValueRef};
use rusqlite::{OptionalExtension, Row, params};
use tracing::{debug, warn};

const SELECT_TASKS: &str = "SELECT id, description, status, due_date FROM tasks";

/// Stored status as `parse_task_row` reads it: trimmed, lowercased, NULL as pending.
const STATUS_KEY: &str = "COALESCE(LOWER(TRIM(status)), 'pending')";

pub fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    let id: TaskId = row.get("id")?;
    let description: String = row.get("description")?;
    let status: Option<String> = row.get("status")?;

    let status = match status {
        Some(s) => s
            .parse::<TaskStatus>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?,
        None => TaskStatus::default(),
    };

    Ok(Task {
        id,
        description,
        status,
        due_date: read_due_date(id, row.get_ref("due_date")?),
    })
}

/// Older writers stored optional dates as NULL or an empty string. Anything
/// that is not a valid date is treated as undated rather than failing the read.
fn read_due_date(id: TaskId, value: ValueRef<'_>) -> Option<NaiveDate> {
    let text = match value {
        ValueRef::Null => return None,
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => text.trim(),
            Err(_) => {
                warn!(task_id = id, "Ignoring non-UTF-8 due date");
                return None;
            }
        },
        other => {
            warn!(task_id = id, kind = ?other.data_type(), "Ignoring non-text due date");
            return None;
        }
    };

    if text.is_empty() {
        return None;
    }

    match NaiveDate::parse_from_str(text, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            warn!(task_id = id, due_date = text, "Ignoring unreadable due date");
            None
        }
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

impl Database {
    /// Insert a new pending task and return its id.
    ///
    /// The description must be non-blank and the due date a real `YYYY-MM-DD`
    /// date. Nothing is written when validation fails.
    pub fn add_task(&self, description: &str, due_date: &str) -> Result<TaskId> {
        let description = normalize_description(description)?;
        let due_date = parse_due_date(due_date)?;

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tasks (description, status, due_date) VALUES (?1, ?2, ?3)",
                params![description, TaskStatus::Pending.as_str(), format_date(due_date)],
            )?;
            let id = conn.last_insert_rowid();
            debug!(task_id = id, due_date = %due_date, "Added task");
            Ok(id)
        })
    }

    /// Get a task by id.
    pub fn get_task(&self, id: TaskId) -> Result<Option<Task>> {
        self.with_conn(|conn| {
            let task = conn
                .query_row(
                    &format!("{} WHERE id = ?1", SELECT_TASKS),
                    params![id],
                    parse_task_row,
                )
                .optional()?;
            Ok(task)
        })
    }

    /// List all tasks, or only those with the given status.
    ///
    /// Rows come back in storage order; ordering for display is the
    /// organizer's job.
    pub fn list_tasks(&self, status: Option<TaskStatus>) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            let tasks = match status {
                Some(status) => {
                    let mut stmt =
                        conn.prepare(&format!("{} WHERE {} = ?1", SELECT_TASKS, STATUS_KEY))?;
                    let rows = stmt
                        .query_map(params![status.as_str()], parse_task_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    rows
                }
                None => {
                    let mut stmt = conn.prepare(SELECT_TASKS)?;
                    let rows = stmt
                        .query_map([], parse_task_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    rows
                }
            };
            Ok(tasks)
        })
    }

    /// Number of stored tasks.
    pub fn count_tasks(&self) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
            Ok(count)
        })
    }

    /// Set the status of a task. Fails with `NotFound` for unknown ids.
    pub fn set_task_status(&self, id: TaskId, status: TaskStatus) -> Result<()> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE tasks SET status = ?1 WHERE id = ?2",
                params![status.as_str(), id],
            )?;
            if changed == 0 {
                return Err(TodoError::NotFound(id));
            }
            debug!(task_id = id, status = %status, "Set task status");
            Ok(())
        })
    }

    /// Flip a task between pending and complete and return the new status.
    pub fn toggle_task_status(&self, id: TaskId) -> Result<TaskStatus> {
        self.with_conn(|conn| {
            let status: Option<String> = conn
                .query_row(
                    &format!(
                        "UPDATE tasks
                         SET status = CASE WHEN {} = 'complete' THEN 'pending' ELSE 'complete' END
                         WHERE id = ?1
                         RETURNING status",
                        STATUS_KEY
                    ),
                    params![id],
                    |row| row.get(0),
                )
                .optional()?;

            let status: TaskStatus = match status {
                Some(s) => s.parse()?,
                None => return Err(TodoError::NotFound(id)),
            };
            debug!(task_id = id, status = %status, "Toggled task status");
            Ok(status)
        })
    }

    /// Overwrite description and due date. Fails with `NotFound` for unknown ids.
    ///
    /// The due date is required here as on insert, so an edit cannot clear it.
    pub fn update_task(&self, id: TaskId, description: &str, due_date: &str) -> Result<()> {
        let description = normalize_description(description)?;
        let due_date = parse_due_date(due_date)?;

        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE tasks SET description = ?1, due_date = ?2 WHERE id = ?3",
                params![description, format_date(due_date), id],
            )?;
            if changed == 0 {
                return Err(TodoError::NotFound(id));
            }
            debug!(task_id = id, due_date = %due_date, "Updated task");
            Ok(())
        })
    }

    /// Delete a task. Deleting an id that does not exist is not an error.
    pub fn delete_task(&self, id: TaskId) -> Result<()> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
            if removed == 0 {
                debug!(task_id = id, "Delete skipped, task already absent");
            } else {
                debug!(task_id = id, "Deleted task");
            }
            Ok(())
        })
    }
}
