//! Interactive numbered menu over the task store.

use super::commands::validate_entry_due_date;
use crate::config::ViewConfig;
use crate::db::Database;
use crate::error::{Result as StoreResult, TodoError};
use crate::format::{OutputFormat, format_task_line, format_view};
use crate::organizer::load_view;
use crate::types::{Task, TaskId, TaskStatus};
use anyhow::Result;
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use tracing::debug;

const MENU: &str = "\nChoose an action:
1. Add task
2. View tasks
3. Mark task complete
4. Delete task
5. Exit";

/// Menu loop reading choices from `input` and writing to `output`.
pub struct Menu<'a, R, W> {
    db: &'a Database,
    view: &'a ViewConfig,
    today: NaiveDate,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(db: &'a Database, view: &'a ViewConfig, today: NaiveDate, input: R, output: W) -> Self {
        Self {
            db,
            view,
            today,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends.
    ///
    /// Store errors are reported and the loop carries on; only I/O failures
    /// on the terminal itself end it early.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };
            debug!(choice = %choice, "Menu choice");

            let outcome = match choice.as_str() {
                "1" => self.add(),
                "2" => self.show(),
                "3" => self.complete(),
                "4" => self.delete(),
                "5" => break,
                _ => {
                    writeln!(self.output, "Invalid choice.")?;
                    continue;
                }
            };

            match outcome {
                Ok(Some(message)) => writeln!(self.output, "{}", message)?,
                Ok(None) => break,
                Err(TodoError::Io(e)) => return Err(e.into()),
                Err(TodoError::Storage(e)) => {
                    writeln!(self.output, "A database error occurred: {}", e)?
                }
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
        self.output.flush()?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    // Each action returns the message to print, or `None` when input ended.

    fn add(&mut self) -> StoreResult<Option<String>> {
        let Some(description) = self.prompt("Enter task description: ")? else {
            return Ok(None);
        };
        let Some(due) = self.prompt("Enter due date (YYYY-MM-DD): ")? else {
            return Ok(None);
        };

        validate_entry_due_date(&due, self.today)?;
        self.db.add_task(&description, &due)?;
        Ok(Some("Task added.".to_string()))
    }

    fn show(&mut self) -> StoreResult<Option<String>> {
        let view = load_view(
            self.db,
            self.view.default_filter,
            self.view.default_sort,
            self.today,
        )?;
        Ok(Some(format_view(&view, OutputFormat::Text)))
    }

    fn complete(&mut self) -> StoreResult<Option<String>> {
        let pending = self.db.list_tasks(Some(TaskStatus::Pending))?;
        if pending.is_empty() {
            return Ok(Some("No pending tasks found.".to_string()));
        }
        self.print_tasks("Pending Tasks:", pending)?;

        let Some(id) = self.prompt_id("Enter the ID of the task to mark complete: ")? else {
            return Ok(None);
        };
        match id {
            Some(id) => {
                self.db.set_task_status(id, TaskStatus::Complete)?;
                Ok(Some("Task status updated.".to_string()))
            }
            None => Ok(Some("Invalid task ID. Please enter a number.".to_string())),
        }
    }

    fn delete(&mut self) -> StoreResult<Option<String>> {
        let tasks = self.db.list_tasks(None)?;
        if tasks.is_empty() {
            return Ok(Some("No tasks found.".to_string()));
        }
        self.print_tasks("Tasks:", tasks)?;

        let Some(id) = self.prompt_id("Enter the ID of the task to delete: ")? else {
            return Ok(None);
        };
        match id {
            Some(id) => {
                self.db.delete_task(id)?;
                Ok(Some("Task deleted.".to_string()))
            }
            None => Ok(Some("Invalid task ID. Please enter a number.".to_string())),
        }
    }

    /// Outer `None` is end of input, inner `None` is a non-numeric answer.
    fn prompt_id(&mut self, label: &str) -> std::io::Result<Option<Option<TaskId>>> {
        Ok(self.prompt(label)?.map(|answer| answer.parse().ok()))
    }

    fn print_tasks(&mut self, heading: &str, mut tasks: Vec<Task>) -> std::io::Result<()> {
        tasks.sort_by_key(|t| t.id);
        writeln!(self.output, "\n{}", heading)?;
        for task in &tasks {
            writeln!(self.output, "{}", format_task_line(task))?;
        }
        Ok(())
    }
}
