//! Work-in-progress limit signals.
//!
//! Limits are advisory: nothing here blocks a move. A column without a
//! limit, or with a limit of zero, never reports one.

#[cfg(test)]
#[path = "wip_test.rs"]
mod wip_test;

use serde::Serialize;

use crate::board::Column;
use crate::consts::WIP_LIMIT_PERCENT;

/// How full a limited column is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WipLevel {
    Normal,
    Warning,
    AtLimit,
}

/// Count, limit and fill level of a limited column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WipStatus {
    pub count: usize,
    pub limit: usize,
    pub percentage: f64,
    pub level: WipLevel,
}

fn limit_of(column: &Column) -> Option<usize> {
    column.max_tasks.filter(|&max| max > 0)
}

#[must_use]
pub fn task_count(column: &Column) -> usize {
    column.len()
}

/// Whether the column holds at least as many tasks as its limit allows.
#[must_use]
pub fn is_column_at_limit(column: &Column) -> bool {
    limit_of(column).is_some_and(|max| column.len() >= max)
}

/// Fill percentage against the limit; 0 without one. Can exceed 100.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn wip_percentage(column: &Column) -> f64 {
    match limit_of(column) {
        Some(max) => column.len() as f64 / max as f64 * 100.0,
        None => 0.0,
    }
}

/// Level for a fill percentage given the warning threshold.
#[must_use]
pub fn wip_level(percentage: f64, warning_percent: f64) -> WipLevel {
    if percentage >= WIP_LIMIT_PERCENT {
        WipLevel::AtLimit
    } else if percentage >= warning_percent {
        WipLevel::Warning
    } else {
        WipLevel::Normal
    }
}

/// Full WIP signal for a column, or `None` when it has no limit.
#[must_use]
pub fn wip_status(column: &Column, warning_percent: f64) -> Option<WipStatus> {
    let limit = limit_of(column)?;
    let percentage = wip_percentage(column);
    Some(WipStatus { count: column.len(), limit, percentage, level: wip_level(percentage, warning_percent) })
}
