//! Board errors.
//!
//! ERROR HANDLING
//! ==============
//! Every failure a board operation can report is a referential miss or a
//! broken snapshot. Misses come from UI races (a drag that outlives the task
//! it carries, a stale edit form) and are absorbed by `BoardEngine`; the pure
//! operations still report them so callers that care can tell a no-op from a
//! change. `Integrity` only arises when a snapshot is built from outside data.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::fmt;

use crate::ids::{ColumnId, TaskId};

/// Grepable error codes, one per variant.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    #[error("task {task} is not in column {column}")]
    TaskNotInColumn { task: TaskId, column: ColumnId },
    #[error("task id already in use: {0}")]
    DuplicateTask(TaskId),
    #[error("snapshot violates board integrity: {}", join_violations(.0))]
    Integrity(Vec<Violation>),
}

impl BoardError {
    /// Whether the error only means "that id is not (or no longer) where you
    /// think it is". These are expected during interaction and safe to drop.
    #[must_use]
    pub fn is_referential_miss(&self) -> bool {
        matches!(self, Self::ColumnNotFound(_) | Self::TaskNotFound(_) | Self::TaskNotInColumn { .. })
    }
}

impl ErrorCode for BoardError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "E_COLUMN_NOT_FOUND",
            Self::TaskNotFound(_) => "E_TASK_NOT_FOUND",
            Self::TaskNotInColumn { .. } => "E_TASK_NOT_IN_COLUMN",
            Self::DuplicateTask(_) => "E_DUPLICATE_TASK",
            Self::Integrity(_) => "E_INTEGRITY",
        }
    }
}

// =============================================================================
// INTEGRITY VIOLATIONS
// =============================================================================

/// One way a snapshot can break referential integrity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Two columns share an id.
    DuplicateColumn(ColumnId),
    /// A column references a task the store does not have.
    DanglingTask { column: ColumnId, task: TaskId },
    /// A task id is listed more than once across all columns.
    RepeatedTask(TaskId),
    /// A stored task is not listed in any column.
    OrphanTask(TaskId),
    /// A task's status disagrees with the column that holds it.
    StatusMismatch { task: TaskId, status: ColumnId, column: ColumnId },
    /// A store entry is keyed under a different id than the task carries.
    KeyMismatch { key: TaskId, id: TaskId },
    /// The same task id was supplied for two records.
    DuplicateRecord(TaskId),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateColumn(id) => write!(f, "duplicate column {id}"),
            Self::DanglingTask { column, task } => write!(f, "column {column} lists missing task {task}"),
            Self::RepeatedTask(id) => write!(f, "task {id} listed more than once"),
            Self::OrphanTask(id) => write!(f, "task {id} is in no column"),
            Self::StatusMismatch { task, status, column } => {
                write!(f, "task {task} has status {status} but sits in column {column}")
            }
            Self::KeyMismatch { key, id } => write!(f, "task {id} stored under key {key}"),
            Self::DuplicateRecord(id) => write!(f, "task {id} supplied more than once"),
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
