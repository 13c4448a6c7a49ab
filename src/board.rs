//! Board model: columns, tasks, and the snapshot that owns them.
//!
//! This module defines the records a board is made of (`Column`, `Task`,
//! `Priority`), the two input shapes used to mutate tasks (`TaskDraft` for
//! creation, `TaskPatch` for sparse edits), and `Board`, the immutable
//! snapshot pairing the ordered column collection with the task store.
//!
//! DESIGN
//! ======
//! Columns and tasks are held behind `Arc`. Operations in `ops` build a new
//! `Board` that shares every entry they did not touch with the previous one,
//! so a renderer can detect changes with `Arc::ptr_eq` instead of deep
//! comparison. Snapshots built from outside data go through `from_parts` (or
//! deserialization) and are checked for referential integrity first.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use time::{Date, OffsetDateTime};

use crate::error::{BoardError, Violation};
use crate::ids::{ColumnId, TaskId, TaskStamp};

// =============================================================================
// RECORDS
// =============================================================================

/// Task priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Every priority, lowest first.
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A workflow stage holding an ordered sequence of task ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Accent color as a CSS color string.
    pub color: String,
    /// Task ids in display order.
    #[serde(default)]
    pub task_ids: Vec<TaskId>,
    /// Advisory WIP limit. Never enforced by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tasks: Option<usize>,
}

impl Column {
    /// Create an empty column without a WIP limit.
    #[must_use]
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>, color: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into(), color: color.into(), task_ids: Vec::new(), max_tasks: None }
    }

    #[must_use]
    pub fn with_max_tasks(mut self, max_tasks: usize) -> Self {
        self.max_tasks = Some(max_tasks);
        self
    }

    #[must_use]
    pub fn with_task_ids<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TaskId>,
    {
        self.task_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Position of a task in this column.
    #[must_use]
    pub fn position_of(&self, task_id: &str) -> Option<usize> {
        self.task_ids.iter().position(|id| id.as_str() == task_id)
    }

    #[must_use]
    pub fn contains(&self, task_id: &str) -> bool {
        self.position_of(task_id).is_some()
    }

    /// Number of tasks in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }
}

/// A unit of work on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Id of the column currently holding this task.
    pub status: ColumnId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Set once at creation, never changed by an update.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,
}

impl Task {
    /// Create a task with only the required fields set.
    #[must_use]
    pub fn new(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        status: impl Into<ColumnId>,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status: status.into(),
            priority: None,
            assignee: None,
            tags: Vec::new(),
            created_at,
            due_date: None,
        }
    }

    /// Materialize a draft into a task living in `status`.
    #[must_use]
    pub fn from_draft(stamp: TaskStamp, status: ColumnId, draft: TaskDraft) -> Self {
        Self {
            id: stamp.id,
            title: draft.title,
            description: draft.description,
            status,
            priority: draft.priority,
            assignee: draft.assignee,
            tags: draft.tags,
            created_at: stamp.created_at,
            due_date: draft.due_date,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_due_date(mut self, due_date: Date) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

// =============================================================================
// MUTATION INPUTS
// =============================================================================

/// Task data supplied on creation. The engine adds id, timestamp and status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,
}

impl TaskDraft {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }
}

/// Sparse update for a task. Only present fields are applied.
///
/// Optional task fields use `Option<Option<T>>`: `None` leaves the field
/// alone, `Some(None)` clears it. On the wire an explicit `null` clears.
/// There is no way to touch `id` or `created_at`.
// Outer `None` means untouched, `Some(None)` means cleared.
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// New status. A value different from the current one moves the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ColumnId>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub priority: Option<Option<Priority>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<Date>>,
}

impl TaskPatch {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<ColumnId>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Option<Priority>) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    #[must_use]
    pub fn with_assignee(mut self, assignee: Option<String>) -> Self {
        self.assignee = Some(assignee);
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    #[must_use]
    pub fn with_due_date(mut self, due_date: Option<Date>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// True when applying the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow-merge the patch over `task`. `id` and `created_at` are kept.
    #[must_use]
    pub fn apply_to(&self, task: &Task) -> Task {
        let mut merged = task.clone();
        if let Some(title) = &self.title {
            merged.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            merged.description.clone_from(description);
        }
        if let Some(status) = &self.status {
            merged.status = status.clone();
        }
        if let Some(priority) = self.priority {
            merged.priority = priority;
        }
        if let Some(assignee) = &self.assignee {
            merged.assignee.clone_from(assignee);
        }
        if let Some(tags) = &self.tags {
            merged.tags.clone_from(tags);
        }
        if let Some(due_date) = self.due_date {
            merged.due_date = due_date;
        }
        merged
    }
}

#[allow(clippy::option_option)]
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Immutable board snapshot: ordered columns plus the task store.
///
/// Only `ops` can produce a snapshot without the integrity check, and only
/// from one that already passed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardParts")]
pub struct Board {
    columns: Vec<Arc<Column>>,
    tasks: BTreeMap<TaskId, Arc<Task>>,
}

/// Wire shape of a board, validated on the way in.
#[derive(Deserialize)]
struct BoardParts {
    columns: Vec<Column>,
    #[serde(default)]
    tasks: BTreeMap<TaskId, Task>,
}

impl TryFrom<BoardParts> for Board {
    type Error = BoardError;

    fn try_from(parts: BoardParts) -> Result<Self, Self::Error> {
        let mut violations = Vec::new();
        for (key, task) in &parts.tasks {
            if *key != task.id {
                violations.push(Violation::KeyMismatch { key: key.clone(), id: task.id.clone() });
            }
        }
        let board = Self::from_shared(
            parts.columns.into_iter().map(Arc::new).collect(),
            parts.tasks.into_iter().map(|(k, t)| (k, Arc::new(t))).collect(),
        );
        violations.extend(board.violations());
        if violations.is_empty() { Ok(board) } else { Err(BoardError::Integrity(violations)) }
    }
}

impl Board {
    /// An empty board with no columns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from columns and tasks, rejecting anything that
    /// breaks referential integrity.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Integrity` listing every violation found.
    pub fn from_parts<I>(columns: Vec<Column>, tasks: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = Task>,
    {
        let mut violations = Vec::new();
        let mut store = BTreeMap::new();
        for task in tasks {
            let id = task.id.clone();
            if store.insert(id.clone(), Arc::new(task)).is_some() {
                violations.push(Violation::DuplicateRecord(id));
            }
        }
        let board = Self::from_shared(columns.into_iter().map(Arc::new).collect(), store);
        violations.extend(board.violations());
        if violations.is_empty() {
            tracing::debug!(columns = board.columns.len(), tasks = board.tasks.len(), "board snapshot built");
            Ok(board)
        } else {
            Err(BoardError::Integrity(violations))
        }
    }

    pub(crate) fn from_shared(columns: Vec<Arc<Column>>, tasks: BTreeMap<TaskId, Arc<Task>>) -> Self {
        Self { columns, tasks }
    }

    // --- Queries ---

    /// Columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Arc<Column>] {
        &self.columns
    }

    /// The task store.
    #[must_use]
    pub fn tasks(&self) -> &BTreeMap<TaskId, Arc<Task>> {
        &self.tasks
    }

    #[must_use]
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id.as_str() == id).map(Arc::as_ref)
    }

    /// Index of a column in display order.
    #[must_use]
    pub fn column_index(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id.as_str() == id)
    }

    #[must_use]
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id).map(Arc::as_ref)
    }

    /// The column currently listing `task_id`.
    #[must_use]
    pub fn column_of(&self, task_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.contains(task_id)).map(Arc::as_ref)
    }

    /// Tasks of a column in display order. Ids without a record are skipped.
    #[must_use]
    pub fn column_tasks(&self, column_id: &str) -> Vec<&Task> {
        self.column(column_id)
            .map(|column| column.task_ids.iter().filter_map(|id| self.task(id.as_str())).collect())
            .unwrap_or_default()
    }

    /// Number of tasks in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    // --- Integrity ---

    /// Every referential-integrity violation in this snapshot.
    #[must_use]
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        let mut column_ids = HashSet::new();
        for column in &self.columns {
            if !column_ids.insert(column.id.as_str()) {
                violations.push(Violation::DuplicateColumn(column.id.clone()));
            }
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for column in &self.columns {
            for task_id in &column.task_ids {
                let count = seen.entry(task_id.as_str()).or_insert(0);
                *count += 1;
                if *count == 2 {
                    violations.push(Violation::RepeatedTask(task_id.clone()));
                }
                match self.tasks.get(task_id) {
                    None => violations.push(Violation::DanglingTask {
                        column: column.id.clone(),
                        task: task_id.clone(),
                    }),
                    Some(task) if task.status != column.id => violations.push(Violation::StatusMismatch {
                        task: task_id.clone(),
                        status: task.status.clone(),
                        column: column.id.clone(),
                    }),
                    Some(_) => {}
                }
            }
        }

        for id in self.tasks.keys() {
            if !seen.contains_key(id.as_str()) {
                violations.push(Violation::OrphanTask(id.clone()));
            }
        }

        violations
    }

    /// Check referential integrity: every listed task exists with a matching
    /// status and every stored task is listed exactly once.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Integrity` listing every violation found.
    pub fn check_integrity(&self) -> Result<(), BoardError> {
        let violations = self.violations();
        if violations.is_empty() { Ok(()) } else { Err(BoardError::Integrity(violations)) }
    }
}
