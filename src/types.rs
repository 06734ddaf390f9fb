//! Core types for the to-do store.

use crate::error::{Result, TodoError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Row id assigned by the store. Never reused after deletion.
pub type TaskId = i64;

/// Textual form of due dates, both on input and in the database.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Task completion status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Complete,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Complete => "complete",
        }
    }

    /// The other status, as flipped by a checkbox.
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::Complete,
            TaskStatus::Complete => TaskStatus::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "complete" => Ok(TaskStatus::Complete),
            other => Err(TodoError::invalid_value(
                "status",
                format!("Unknown status '{}': expected pending or complete", other),
            )),
        }
    }
}

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    pub status: TaskStatus,
    /// Absent only for rows written by older versions of the tool.
    pub due_date: Option<NaiveDate>,
}

impl Task {
    pub fn is_complete(&self) -> bool {
        self.status == TaskStatus::Complete
    }

    pub fn due_date_str(&self) -> Option<String> {
        self.due_date.map(|d| d.format(DATE_FORMAT).to_string())
    }
}

/// Parse a `YYYY-MM-DD` due date.
///
/// The shape is checked strictly before handing off to chrono, which would
/// otherwise accept forms like `2024-1-5`.
pub fn parse_due_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TodoError::missing_field("due_date"));
    }

    let bytes = input.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid_date(input));
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid_date(input))
}

fn invalid_date(input: &str) -> TodoError {
    TodoError::invalid_value(
        "due_date",
        format!(
            "Invalid date '{}'. Use YYYY-MM-DD (e.g., 2026-12-31).",
            input
        ),
    )
}

/// Trim a description and reject it if nothing is left.
pub fn normalize_description(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TodoError::missing_field("description"));
    }
    Ok(trimmed.to_string())
}
