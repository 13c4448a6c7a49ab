//! Drag gesture state.
//!
//! `DragState` tracks one drag from pick-up to drop. It is ephemeral and
//! lives beside the committed board, never inside it: hovering changes only
//! the drop target, and abandoning the gesture leaves the board untouched.
//! A drop turns the gesture into a move `Action` for the reducer.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::engine::Action;
use crate::ids::{ColumnId, TaskId};

/// Column and insertion index currently under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub column: ColumnId,
    pub index: usize,
}

/// The drag gesture in progress, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A task has been picked up.
    Dragging {
        /// Task being dragged.
        task_id: TaskId,
        /// Column the task was picked up from.
        from_column: ColumnId,
        /// Hover target, cleared when the pointer leaves a column.
        over: Option<DropTarget>,
    },
}

impl DragState {
    /// Pick up `task_id` from `column`. Replaces any gesture in progress.
    pub fn start(&mut self, task_id: impl Into<TaskId>, column: impl Into<ColumnId>) {
        *self = Self::Dragging { task_id: task_id.into(), from_column: column.into(), over: None };
    }

    /// Record the hover target. Ignored while idle. Returns whether the
    /// target changed, so the host can skip redundant redraws.
    pub fn over(&mut self, column: impl Into<ColumnId>, index: usize) -> bool {
        let Self::Dragging { over, .. } = self else {
            return false;
        };
        let target = DropTarget { column: column.into(), index };
        if over.as_ref() == Some(&target) {
            return false;
        }
        *over = Some(target);
        true
    }

    /// Clear the hover target, keeping the gesture alive.
    pub fn leave(&mut self) {
        if let Self::Dragging { over, .. } = self {
            *over = None;
        }
    }

    /// Abandon the gesture.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    /// Finish the gesture over `column`, yielding the move to apply.
    ///
    /// The index is the hover index when the hover target is this column,
    /// otherwise 0. Dropping while idle yields nothing. The state is idle
    /// afterwards either way.
    pub fn drop_on(&mut self, column: &str) -> Option<Action> {
        let Self::Dragging { task_id, from_column, over } = std::mem::take(self) else {
            return None;
        };
        let index = over.filter(|target| target.column == column).map_or(0, |target| target.index);
        Some(Action::MoveTask { task_id, from: from_column, to: column.into(), index })
    }

    // --- Queries ---

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Whether `task_id` is the task being dragged.
    #[must_use]
    pub fn is_dragging(&self, task_id: &str) -> bool {
        matches!(self, Self::Dragging { task_id: dragged, .. } if dragged == task_id)
    }

    /// Task being dragged and the column it came from.
    #[must_use]
    pub fn dragged(&self) -> Option<(&TaskId, &ColumnId)> {
        match self {
            Self::Dragging { task_id, from_column, .. } => Some((task_id, from_column)),
            Self::Idle => None,
        }
    }

    #[must_use]
    pub fn drop_target(&self) -> Option<&DropTarget> {
        match self {
            Self::Dragging { over, .. } => over.as_ref(),
            Self::Idle => None,
        }
    }

    /// Index at which `column` should draw a drop indicator, if it is the
    /// current hover target.
    #[must_use]
    pub fn drop_indicator(&self, column: &str) -> Option<usize> {
        self.drop_target().filter(|target| target.column == column).map(|target| target.index)
    }
}
