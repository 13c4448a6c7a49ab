//! Board operations: move, create, update, delete.
//!
//! DESIGN
//! ======
//! Each operation borrows a snapshot and returns a new one, never touching
//! the input. Only the column(s) and task entry an operation changes are
//! rebuilt; every other `Arc` is carried over as-is. An operation that would
//! leave a sequence exactly as it was keeps the old `Arc` too.
//!
//! ERROR HANDLING
//! ==============
//! Preconditions are checked before anything is built, so a failed
//! operation has no partial effect. WIP limits are never consulted here.

#[cfg(test)]
#[path = "ops_test.rs"]
mod ops_test;

use std::sync::Arc;

use crate::board::{Board, Column, Task, TaskDraft, TaskPatch};
use crate::error::BoardError;
use crate::ids::{ColumnId, TaskId, TaskStamp};
use crate::reorder::{reorder, transfer};

impl Board {
    /// Move `task_id` out of `from` and into `to` at `target_index`.
    ///
    /// Within one column the index counts positions after the task has been
    /// lifted out; across columns it counts positions in the destination as
    /// it stands. Either way it is clamped. The task's status follows the
    /// destination column.
    ///
    /// # Errors
    ///
    /// `ColumnNotFound` if either column is missing, `TaskNotInColumn` if
    /// `from` does not list the task, `TaskNotFound` if the store lacks it.
    pub fn move_task(&self, task_id: &str, from: &str, to: &str, target_index: usize) -> Result<Board, BoardError> {
        let from_idx = self.column_index(from).ok_or_else(|| BoardError::ColumnNotFound(from.into()))?;
        let to_idx = self.column_index(to).ok_or_else(|| BoardError::ColumnNotFound(to.into()))?;

        let source = &self.columns()[from_idx];
        let position = source
            .position_of(task_id)
            .ok_or_else(|| BoardError::TaskNotInColumn { task: task_id.into(), column: from.into() })?;
        let task = self.tasks().get(task_id).ok_or_else(|| BoardError::TaskNotFound(task_id.into()))?;

        let mut columns = self.columns().to_vec();
        if from_idx == to_idx {
            let reordered = reorder(&source.task_ids, position, target_index);
            if reordered != source.task_ids {
                columns[from_idx] = with_task_ids(source, reordered);
            }
        } else {
            let dest = &self.columns()[to_idx];
            let (remaining, received) = transfer(&source.task_ids, &dest.task_ids, position, target_index);
            columns[from_idx] = with_task_ids(source, remaining);
            columns[to_idx] = with_task_ids(dest, received);
        }

        let mut tasks = self.tasks().clone();
        if task.status.as_str() != to {
            let moved = Task { status: ColumnId::from(to), ..Task::clone(task) };
            tasks.insert(moved.id.clone(), Arc::new(moved));
        }

        Ok(Board::from_shared(columns, tasks))
    }

    /// Store a new task built from `draft` and append it to `column_id`.
    ///
    /// The title is taken as given; validation belongs to the form layer.
    ///
    /// # Errors
    ///
    /// `ColumnNotFound` if the column is missing, `DuplicateTask` if the
    /// stamped id is already on the board.
    pub fn create_task(&self, column_id: &str, draft: TaskDraft, stamp: TaskStamp) -> Result<Board, BoardError> {
        let idx = self.column_index(column_id).ok_or_else(|| BoardError::ColumnNotFound(column_id.into()))?;
        if self.tasks().contains_key(&stamp.id) || self.column_of(stamp.id.as_str()).is_some() {
            return Err(BoardError::DuplicateTask(stamp.id));
        }

        let column = &self.columns()[idx];
        let task = Task::from_draft(stamp, column.id.clone(), draft);

        let mut task_ids = column.task_ids.clone();
        task_ids.push(task.id.clone());
        let mut columns = self.columns().to_vec();
        columns[idx] = with_task_ids(column, task_ids);

        let mut tasks = self.tasks().clone();
        tasks.insert(task.id.clone(), Arc::new(task));

        Ok(Board::from_shared(columns, tasks))
    }

    /// Merge `patch` into the task. A status change moves the task to the
    /// end of the new column.
    ///
    /// # Errors
    ///
    /// `TaskNotFound` if the task is missing, `ColumnNotFound` if the patch
    /// names a status with no matching column. Neither leaves a trace.
    pub fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<Board, BoardError> {
        let current = self.tasks().get(task_id).ok_or_else(|| BoardError::TaskNotFound(task_id.into()))?;
        let merged = patch.apply_to(current);

        let mut columns = self.columns().to_vec();
        if merged.status != current.status {
            let dest_idx = self
                .column_index(merged.status.as_str())
                .ok_or_else(|| BoardError::ColumnNotFound(merged.status.clone()))?;

            for (idx, column) in self.columns().iter().enumerate() {
                if idx != dest_idx && column.contains(task_id) {
                    columns[idx] = without_task(column, task_id);
                }
            }

            let dest = &self.columns()[dest_idx];
            let mut task_ids: Vec<TaskId> = dest.task_ids.iter().filter(|id| id.as_str() != task_id).cloned().collect();
            task_ids.push(merged.id.clone());
            columns[dest_idx] = with_task_ids(dest, task_ids);
        }

        let mut tasks = self.tasks().clone();
        if merged != **current {
            tasks.insert(merged.id.clone(), Arc::new(merged));
        }

        Ok(Board::from_shared(columns, tasks))
    }

    /// Remove the task from the store and from every column listing it.
    ///
    /// # Errors
    ///
    /// `TaskNotFound` if neither the store nor any column knows the id.
    pub fn delete_task(&self, task_id: &str) -> Result<Board, BoardError> {
        let in_store = self.tasks().contains_key(task_id);
        let in_columns = self.columns().iter().any(|c| c.contains(task_id));
        if !in_store && !in_columns {
            return Err(BoardError::TaskNotFound(task_id.into()));
        }

        let columns = self
            .columns()
            .iter()
            .map(|column| if column.contains(task_id) { without_task(column, task_id) } else { Arc::clone(column) })
            .collect();

        let mut tasks = self.tasks().clone();
        tasks.remove(task_id);

        Ok(Board::from_shared(columns, tasks))
    }
}

fn with_task_ids(column: &Column, task_ids: Vec<TaskId>) -> Arc<Column> {
    Arc::new(Column { task_ids, ..column.clone() })
}

fn without_task(column: &Column, task_id: &str) -> Arc<Column> {
    with_task_ids(column, column.task_ids.iter().filter(|id| id.as_str() != task_id).cloned().collect())
}
