//! Task form data and validation.
//!
//! `TaskForm` is the editable state behind the create/edit dialog. Fields
//! hold raw user input; `to_draft` and `to_patch` normalize it (trim, empty
//! to absent) on the way out. Validation failures are returned as
//! `FieldErrors`, never raised.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::board::{Priority, Task, TaskDraft, TaskPatch};
use crate::consts::TITLE_REQUIRED;

/// A field of the task form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Title,
    Description,
    Priority,
    Assignee,
    Tags,
    DueDate,
}

impl FormField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Priority => "priority",
            Self::Assignee => "assignee",
            Self::Tags => "tags",
            Self::DueDate => "due_date",
        }
    }
}

/// Per-field validation messages, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {message}", field.as_str())?;
        }
        Ok(())
    }
}

/// Editable form state for creating or editing a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assignee: String,
    pub tags: Vec<String>,
    pub due_date: Option<Date>,
}

impl TaskForm {
    /// Empty form for a new task. Priority starts at medium.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority.unwrap_or_default(),
            assignee: task.assignee.clone().unwrap_or_default(),
            tags: task.tags.clone(),
            due_date: task.due_date,
        }
    }

    /// Add a tag from raw input. Blank input and tags already present are
    /// ignored. Returns whether a tag was added.
    pub fn add_tag(&mut self, input: &str) -> bool {
        let tag = input.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_owned());
        true
    }

    /// Remove a tag. Returns whether it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns the field errors when the trimmed title is empty.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.title.trim().is_empty() {
            errors.insert(FormField::Title, TITLE_REQUIRED);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Normalized creation input. Does not validate.
    #[must_use]
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.trim().to_owned(),
            description: non_blank(&self.description),
            priority: Some(self.priority),
            assignee: non_blank(&self.assignee),
            tags: self.tags.clone(),
            due_date: self.due_date,
        }
    }

    /// Normalized edit of `task`. Every form field is written, blank ones
    /// clearing the task's value. The status is pinned to the task's current
    /// one so saving the form never moves the task.
    #[must_use]
    pub fn to_patch(&self, task: &Task) -> TaskPatch {
        TaskPatch {
            title: Some(self.title.trim().to_owned()),
            description: Some(non_blank(&self.description)),
            status: Some(task.status.clone()),
            priority: Some(Some(self.priority)),
            assignee: Some(non_blank(&self.assignee)),
            tags: Some(self.tags.clone()),
            due_date: Some(self.due_date),
        }
    }

    /// Validate, then build the creation input.
    ///
    /// # Errors
    ///
    /// Returns the field errors from `validate`.
    pub fn submit_draft(&self) -> Result<TaskDraft, FieldErrors> {
        self.validate()?;
        Ok(self.to_draft())
    }

    /// Validate, then build the edit of `task`.
    ///
    /// # Errors
    ///
    /// Returns the field errors from `validate`.
    pub fn submit_patch(&self, task: &Task) -> Result<TaskPatch, FieldErrors> {
        self.validate()?;
        Ok(self.to_patch(task))
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
