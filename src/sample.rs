//! Demo boards.
//!
//! `sample_board` is the fixed four-column board used for demos and tests.
//! `mock_board` fills the same columns with random tasks for load testing a
//! renderer. Both are consistent by construction.

#[cfg(test)]
#[path = "sample_test.rs"]
mod sample_test;

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::Rng;
use rand::seq::IndexedRandom;
use time::macros::{date, datetime};
use time::{Duration, OffsetDateTime};

use crate::board::{Board, Column, Priority, Task};
use crate::ids::TaskId;

const MOCK_ASSIGNEES: [&str; 5] = ["Alice Johnson", "Bob Smith", "Carol White", "David Brown", "Eve Davis"];
const MOCK_TAGS: [&str; 7] = ["frontend", "backend", "design", "feature", "bug", "urgent", "refactor"];
const MOCK_VERBS: [&str; 5] = ["Implement", "Design", "Fix", "Update", "Create"];
const MOCK_NOUNS: [&str; 5] = ["feature", "component", "bug", "layout", "API"];

/// The four workflow columns with their WIP limits and no tasks.
#[must_use]
pub fn sample_columns() -> Vec<Column> {
    vec![
        Column::new("todo", "To Do", "#6b7280").with_max_tasks(10),
        Column::new("in-progress", "In Progress", "#3b82f6").with_max_tasks(5),
        Column::new("review", "Review", "#f59e0b").with_max_tasks(3),
        Column::new("done", "Done", "#10b981"),
    ]
}

/// Fixed demo board with five tasks.
#[must_use]
pub fn sample_board() -> Board {
    let tasks = [
        Task::new("task-1", "Implement drag and drop", "todo", datetime!(2024-01-10 00:00:00 UTC))
            .with_description("Add D&D functionality to kanban cards using native HTML5 drag and drop API")
            .with_priority(Priority::High)
            .with_assignee("John Doe")
            .with_tags(["frontend", "feature"])
            .with_due_date(date!(2024-01-20)),
        Task::new("task-2", "Design task modal", "todo", datetime!(2024-01-11 00:00:00 UTC))
            .with_description("Create modal for editing task details with proper form validation")
            .with_priority(Priority::Medium)
            .with_assignee("Jane Smith")
            .with_tags(["design", "ui"])
            .with_due_date(date!(2024-01-18)),
        Task::new("task-3", "Setup TypeScript", "in-progress", datetime!(2024-01-09 00:00:00 UTC))
            .with_description("Configure TypeScript with strict mode enabled")
            .with_priority(Priority::Urgent)
            .with_assignee("John Doe")
            .with_tags(["setup", "typescript"]),
        Task::new("task-4", "Create project structure", "done", datetime!(2024-01-08 00:00:00 UTC))
            .with_description("Setup folder structure and initial files according to requirements")
            .with_priority(Priority::Low)
            .with_assignee("Jane Smith")
            .with_tags(["setup"])
            .with_due_date(date!(2024-01-09)),
        Task::new("task-5", "Install dependencies", "done", datetime!(2024-01-08 00:00:00 UTC))
            .with_priority(Priority::Low)
            .with_assignee("John Doe")
            .with_tags(["setup"]),
    ];

    let mut columns = sample_columns();
    for column in &mut columns {
        column.task_ids =
            tasks.iter().filter(|task| task.status == column.id).map(|task| task.id.clone()).collect();
    }
    assemble(columns, tasks)
}

/// Board with `count` random tasks (`task-1` .. `task-<count>`) spread over
/// the sample columns.
#[must_use]
pub fn mock_board<R: Rng>(count: usize, rng: &mut R) -> Board {
    let mut columns = sample_columns();
    let mut tasks = Vec::with_capacity(count);
    let jan_1 = date!(2024-01-01);

    for n in 1..=count {
        let slot = rng.random_range(0..columns.len());
        let column = &mut columns[slot];
        let id = TaskId::new(format!("task-{n}"));

        let verb = MOCK_VERBS.choose(rng).copied().unwrap_or_default();
        let noun = MOCK_NOUNS.choose(rng).copied().unwrap_or_default();
        let created: OffsetDateTime = (jan_1 + Duration::days(rng.random_range(0..20))).midnight().assume_utc();
        let mut task = Task::new(id.clone(), format!("Task {n}: {verb} {noun}"), column.id.clone(), created);

        if rng.random_bool(0.5) {
            task.description = Some(format!("Detailed description for task {n}"));
        }
        task.priority = Priority::ALL.choose(rng).copied();
        if rng.random_bool(0.8) {
            task.assignee = MOCK_ASSIGNEES.choose(rng).map(|name| (*name).to_owned());
        }
        for _ in 0..rng.random_range(0..4) {
            let Some(tag) = MOCK_TAGS.choose(rng) else { continue };
            if !task.tags.iter().any(|t| t == tag) {
                task.tags.push((*tag).to_owned());
            }
        }
        if rng.random_bool(0.6) {
            task.due_date = Some(jan_1 + Duration::days(rng.random_range(14..44)));
        }

        column.task_ids.push(id);
        tasks.push(task);
    }
    assemble(columns, tasks)
}

fn assemble(columns: Vec<Column>, tasks: impl IntoIterator<Item = Task>) -> Board {
    let store: BTreeMap<TaskId, Arc<Task>> = tasks.into_iter().map(|task| (task.id.clone(), Arc::new(task))).collect();
    Board::from_shared(columns.into_iter().map(Arc::new).collect(), store)
}
