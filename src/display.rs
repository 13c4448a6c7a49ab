//! Text helpers for rendering task cards.

#[cfg(test)]
#[path = "display_test.rs"]
mod display_test;

use time::{Date, OffsetDateTime};

use crate::board::Task;
use crate::consts::ELLIPSIS;

/// Today's date in UTC.
#[must_use]
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Whether a due date has passed. A task due today is not overdue.
#[must_use]
pub fn is_overdue(due: Date, today: Date) -> bool {
    due < today
}

/// Whether `task` has a due date before `today`.
#[must_use]
pub fn task_is_overdue(task: &Task, today: Date) -> bool {
    task.due_date.is_some_and(|due| is_overdue(due, today))
}

/// `"Today"`, `"Tomorrow"`, or a short month-day label such as `"Jan 20"`.
#[must_use]
pub fn due_label(due: Date, today: Date) -> String {
    if due == today {
        return "Today".to_owned();
    }
    if today.next_day() == Some(due) {
        return "Tomorrow".to_owned();
    }
    let month = due.month().to_string();
    let short: String = month.chars().take(3).collect();
    format!("{short} {}", due.day())
}

/// Up to two upper-cased initials from the first letters of each word.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace().filter_map(|word| word.chars().next()).flat_map(char::to_uppercase).take(2).collect()
}

/// Cut `text` to `max_chars` characters, marking the cut with an ellipsis.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_owned(),
    }
}
