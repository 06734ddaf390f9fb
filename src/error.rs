//! Error types for store and organizer operations.

use crate::types::TaskId;
use serde::Serialize;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    MissingRequiredField,
    InvalidFieldValue,

    // Not found errors
    TaskNotFound,

    // Storage errors
    DatabaseError,
}

/// Errors surfaced by the task store.
///
/// Storage failures are never retried here; the caller decides what to do.
#[derive(Debug, Error)]
pub enum TodoError {
    /// Malformed or missing input. Nothing was written.
    #[error("{message}")]
    Validation {
        code: ErrorCode,
        field: &'static str,
        message: String,
    },

    /// The mutation target does not exist.
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("schema migration failed: {0}")]
    Migration(#[from] refinery::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TodoError {
    pub fn missing_field(field: &'static str) -> Self {
        Self::Validation {
            code: ErrorCode::MissingRequiredField,
            field,
            message: format!("{} is required", field),
        }
    }

    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::InvalidFieldValue,
            field,
            message: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            TodoError::Validation { code, .. } => *code,
            TodoError::NotFound(_) => ErrorCode::TaskNotFound,
            TodoError::Storage(_) | TodoError::Migration(_) | TodoError::Io(_) => {
                ErrorCode::DatabaseError
            }
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TodoError::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TodoError::NotFound(_))
    }

    /// Build the serializable form used for JSON output.
    pub fn report(&self) -> ErrorReport {
        let field = match self {
            TodoError::Validation { field, .. } => Some((*field).to_string()),
            _ => None,
        };
        ErrorReport {
            code: self.code(),
            message: self.to_string(),
            field,
        }
    }
}

/// Structured error for machine-readable output.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, TodoError>;
