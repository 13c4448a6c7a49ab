//! Board engine: the pure reducer and the host-owned state slot.
//!
//! DESIGN
//! ======
//! `reduce` maps a snapshot and an `Action` to the next snapshot plus a
//! `Change` describing what happened. It never mutates its input. The host
//! keeps the current snapshot in a `BoardEngine`, which also owns the drag
//! gesture and the id source, and exposes the callbacks a renderer wires its
//! events to.
//!
//! ERROR HANDLING
//! ==============
//! `reduce` reports every miss. `BoardEngine` absorbs them: the board stays
//! as it was, the callback returns `Change::None`, and the miss is logged at
//! debug level. Anything that is not a referential miss is logged at warn.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::{Deserialize, Serialize};

use crate::board::{Board, TaskDraft, TaskPatch};
use crate::config::BoardConfig;
use crate::drag::DragState;
use crate::drop_position::{ElementBounds, insertion_index};
use crate::error::{BoardError, ErrorCode};
use crate::form::{FieldErrors, TaskForm};
use crate::ids::{ClockIdSource, ColumnId, IdSource, TaskId, TaskStamp};
use crate::wip::{WipStatus, wip_status};

// =============================================================================
// ACTIONS
// =============================================================================

/// A board mutation, as queued or replayed by a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Action {
    MoveTask {
        task_id: TaskId,
        from: ColumnId,
        to: ColumnId,
        #[serde(default)]
        index: usize,
    },
    CreateTask {
        column: ColumnId,
        /// Caller-chosen id. Generated when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        task_id: Option<TaskId>,
        draft: TaskDraft,
    },
    UpdateTask {
        task_id: TaskId,
        patch: TaskPatch,
    },
    DeleteTask {
        task_id: TaskId,
    },
}

impl Action {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::MoveTask { .. } => "move_task",
            Self::CreateTask { .. } => "create_task",
            Self::UpdateTask { .. } => "update_task",
            Self::DeleteTask { .. } => "delete_task",
        }
    }
}

/// What an applied action did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum Change {
    /// Nothing changed.
    None,
    /// The task now sits at `index` in `to`.
    TaskMoved { task_id: TaskId, from: ColumnId, to: ColumnId, index: usize },
    TaskCreated { task_id: TaskId, column: ColumnId },
    /// Fields were merged; `moved_to` is set when a status change moved it.
    TaskUpdated { task_id: TaskId, moved_to: Option<ColumnId> },
    TaskDeleted { task_id: TaskId },
}

impl Change {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// =============================================================================
// REDUCER
// =============================================================================

/// Apply `action` to `board`.
///
/// Ids for created tasks come from `ids`, which is consulted only once the
/// create is known to succeed. An action that leaves the board as it was
/// yields `Change::None` and an equal snapshot.
///
/// # Errors
///
/// Whatever the underlying board operation reports; the input is untouched.
pub fn reduce<S>(board: &Board, action: &Action, ids: &mut S) -> Result<(Board, Change), BoardError>
where
    S: IdSource + ?Sized,
{
    match action {
        Action::MoveTask { task_id, from, to, index } => {
            let next = board.move_task(task_id.as_str(), from.as_str(), to.as_str(), *index)?;
            if next == *board {
                return Ok((next, Change::None));
            }
            let landed = next.column(to.as_str()).and_then(|c| c.position_of(task_id.as_str())).unwrap_or(*index);
            let change =
                Change::TaskMoved { task_id: task_id.clone(), from: from.clone(), to: to.clone(), index: landed };
            Ok((next, change))
        }
        Action::CreateTask { column, task_id, draft } => {
            if board.column(column.as_str()).is_none() {
                return Err(BoardError::ColumnNotFound(column.clone()));
            }
            let stamp = match task_id {
                Some(id) => TaskStamp { id: id.clone(), created_at: ids.now() },
                None => ids.next_stamp(),
            };
            let created = stamp.id.clone();
            let next = board.create_task(column.as_str(), draft.clone(), stamp)?;
            Ok((next, Change::TaskCreated { task_id: created, column: column.clone() }))
        }
        Action::UpdateTask { task_id, patch } => {
            let before = board.task(task_id.as_str()).map(|t| t.status.clone());
            let next = board.update_task(task_id.as_str(), patch)?;
            if next == *board {
                return Ok((next, Change::None));
            }
            let after = next.task(task_id.as_str()).map(|t| t.status.clone());
            let moved_to = if before == after { None } else { after };
            Ok((next, Change::TaskUpdated { task_id: task_id.clone(), moved_to }))
        }
        Action::DeleteTask { task_id } => {
            let next = board.delete_task(task_id.as_str())?;
            Ok((next, Change::TaskDeleted { task_id: task_id.clone() }))
        }
    }
}

// =============================================================================
// HOST SLOT
// =============================================================================

/// Owns the current board, the drag gesture and the id source.
#[derive(Debug)]
pub struct BoardEngine<S = ClockIdSource> {
    board: Board,
    drag: DragState,
    config: BoardConfig,
    ids: S,
}

impl BoardEngine<ClockIdSource> {
    /// Engine with default configuration.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self::with_config(board, BoardConfig::default())
    }

    #[must_use]
    pub fn with_config(board: Board, config: BoardConfig) -> Self {
        let ids = config.id_source();
        Self::with_id_source(board, config, ids)
    }
}

impl<S: IdSource> BoardEngine<S> {
    #[must_use]
    pub fn with_id_source(board: Board, config: BoardConfig, ids: S) -> Self {
        Self { board, drag: DragState::default(), config, ids }
    }

    // --- Queries ---

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn into_board(self) -> Board {
        self.board
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// WIP signal for a column, using the configured warning threshold.
    #[must_use]
    pub fn wip(&self, column_id: &str) -> Option<WipStatus> {
        wip_status(self.board.column(column_id)?, self.config.wip_warning_percent)
    }

    // --- Data inputs ---

    /// Replace the board wholesale. Any drag in progress is abandoned.
    pub fn load_snapshot(&mut self, board: Board) {
        self.drag.cancel();
        self.board = board;
        tracing::info!(columns = self.board.columns().len(), tasks = self.board.len(), "board snapshot loaded");
    }

    /// Apply an action, absorbing misses.
    pub fn dispatch(&mut self, action: &Action) -> Change {
        match reduce(&self.board, action, &mut self.ids) {
            Ok((next, change)) => {
                if !change.is_none() {
                    self.board = next;
                    tracing::debug!(op = action.name(), ?change, "action applied");
                }
                change
            }
            Err(err) => {
                if err.is_referential_miss() {
                    tracing::debug!(op = action.name(), code = err.error_code(), error = %err, "action absorbed");
                } else {
                    tracing::warn!(op = action.name(), code = err.error_code(), error = %err, "action rejected");
                }
                Change::None
            }
        }
    }

    // --- Callbacks ---

    pub fn on_task_move(&mut self, task_id: &str, from: &str, to: &str, target_index: usize) -> Change {
        let action = Action::MoveTask { task_id: task_id.into(), from: from.into(), to: to.into(), index: target_index };
        self.dispatch(&action)
    }

    /// Create a task at the end of `column_id`. Returns its id, or `None`
    /// when the column does not exist.
    pub fn on_task_create(&mut self, column_id: &str, draft: TaskDraft) -> Option<TaskId> {
        match self.dispatch(&Action::CreateTask { column: column_id.into(), task_id: None, draft }) {
            Change::TaskCreated { task_id, .. } => Some(task_id),
            _ => None,
        }
    }

    pub fn on_task_update(&mut self, task_id: &str, patch: TaskPatch) -> Change {
        self.dispatch(&Action::UpdateTask { task_id: task_id.into(), patch })
    }

    pub fn on_task_delete(&mut self, task_id: &str) -> Change {
        self.dispatch(&Action::DeleteTask { task_id: task_id.into() })
    }

    // --- Form submission ---

    /// Validate a new-task form and create the task in `column_id`.
    ///
    /// # Errors
    ///
    /// Returns the form's field errors; the board is untouched.
    pub fn submit_new_task(&mut self, column_id: &str, form: &TaskForm) -> Result<Option<TaskId>, FieldErrors> {
        let draft = form.submit_draft()?;
        Ok(self.on_task_create(column_id, draft))
    }

    /// Validate an edit form and apply it to `task_id`. A task that has
    /// vanished since the form opened is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the form's field errors; the board is untouched.
    pub fn submit_edit(&mut self, task_id: &str, form: &TaskForm) -> Result<Change, FieldErrors> {
        let Some(task) = self.board.task(task_id) else {
            form.validate()?;
            tracing::debug!(task_id, "edit submitted for missing task");
            return Ok(Change::None);
        };
        let patch = form.submit_patch(task)?;
        Ok(self.on_task_update(task_id, patch))
    }

    // --- Drag and drop ---

    /// Pick up a task. Ignored unless `column_id` currently holds it.
    pub fn on_drag_start(&mut self, task_id: &str, column_id: &str) -> bool {
        if !self.board.column(column_id).is_some_and(|c| c.contains(task_id)) {
            tracing::debug!(task_id, column_id, "drag start ignored");
            return false;
        }
        self.drag.start(task_id, column_id);
        true
    }

    /// Pointer moved over `column_id`. Resolves the insertion index from the
    /// measured cards and records it as the hover target. Returns the index,
    /// or `None` when no drag is in progress.
    pub fn on_drag_over(&mut self, column_id: &str, pointer_offset: f64, cards: &[ElementBounds]) -> Option<usize> {
        if !self.drag.is_active() {
            return None;
        }
        let index = insertion_index(pointer_offset, cards);
        self.drag.over(column_id, index);
        Some(index)
    }

    pub fn on_drag_leave(&mut self) {
        self.drag.leave();
    }

    /// Drag released outside any column.
    pub fn on_drag_cancel(&mut self) {
        self.drag.cancel();
    }

    /// Drag released over `column_id`.
    ///
    /// The hover index counts the cards as rendered, the dragged one
    /// included. Within its own column a move counts positions after the
    /// task is lifted out, so a drop below the task's current slot is
    /// shifted up by one to land where the indicator was drawn.
    pub fn on_drop(&mut self, column_id: &str) -> Change {
        let Some(mut action) = self.drag.drop_on(column_id) else {
            return Change::None;
        };
        if let Action::MoveTask { task_id, from, to, index } = &mut action {
            if *from == *to {
                let own = self.board.column(from.as_str()).and_then(|c| c.position_of(task_id.as_str()));
                if own.is_some_and(|own| *index > own) {
                    *index -= 1;
                }
            }
        }
        self.dispatch(&action)
    }
}
