//! Shared constants for the board engine.

// ── Task ids ────────────────────────────────────────────────────

/// Prefix of generated task ids (`task-<millis>-<suffix>`).
pub const DEFAULT_ID_PREFIX: &str = "task";

/// Length of the random base-36 suffix appended to generated task ids.
pub const DEFAULT_ID_SUFFIX_LEN: usize = 9;

/// Alphabet for the random id suffix.
pub const ID_SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// ── WIP limits ──────────────────────────────────────────────────

/// Fill percentage at which a column's WIP signal turns to a warning.
pub const DEFAULT_WIP_WARNING_PERCENT: f64 = 80.0;

/// Fill percentage at which a column is at its WIP limit.
pub const WIP_LIMIT_PERCENT: f64 = 100.0;

// ── Text ────────────────────────────────────────────────────────

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Message attached to an empty title on form submission.
pub const TITLE_REQUIRED: &str = "Title is required";
