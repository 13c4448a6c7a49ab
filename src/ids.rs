//! Identifier newtypes and task-id generation.
//!
//! DESIGN
//! ======
//! Column and task ids are opaque strings chosen by the host (`"todo"`,
//! `"task-1"`). Newtypes keep the two from being swapped at call sites, and
//! `Borrow<str>` lets maps keyed by them be queried with a plain `&str`.
//!
//! Generated task ids concatenate a millisecond timestamp with a random
//! base-36 suffix so two tasks created within the same millisecond still
//! get distinct ids.

#[cfg(test)]
#[path = "ids_test.rs"]
mod ids_test;

use std::borrow::Borrow;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::consts::ID_SUFFIX_ALPHABET;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing id string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The raw id string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id! {
    /// Identifier of a column. Doubles as the `status` value of the tasks it holds.
    ColumnId
}

string_id! {
    /// Globally unique identifier of a task.
    TaskId
}

// =============================================================================
// GENERATION
// =============================================================================

/// Identity assigned to a task at creation: its id and immutable creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStamp {
    pub id: TaskId,
    pub created_at: OffsetDateTime,
}

/// Source of identities for newly created tasks.
///
/// The reducer asks for a stamp only when a create is actually applied, so
/// rejected creates never consume ids.
pub trait IdSource {
    /// Creation time for the next task.
    fn now(&mut self) -> OffsetDateTime;

    /// A fresh id for a task created at `at`.
    fn next_id(&mut self, at: OffsetDateTime) -> TaskId;

    fn next_stamp(&mut self) -> TaskStamp {
        let created_at = self.now();
        TaskStamp { id: self.next_id(created_at), created_at }
    }
}

/// Stamps tasks with the wall clock and a random suffix.
#[derive(Debug, Clone)]
pub struct ClockIdSource {
    prefix: String,
    suffix_len: usize,
}

impl ClockIdSource {
    #[must_use]
    pub fn new(prefix: impl Into<String>, suffix_len: usize) -> Self {
        Self { prefix: prefix.into(), suffix_len }
    }
}

impl IdSource for ClockIdSource {
    fn now(&mut self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn next_id(&mut self, at: OffsetDateTime) -> TaskId {
        generate_task_id(&self.prefix, at, self.suffix_len, &mut rand::rng())
    }
}

/// Build a task id of the form `<prefix>-<unix millis>-<random base36>`.
#[must_use]
pub fn generate_task_id<R: Rng>(prefix: &str, at: OffsetDateTime, suffix_len: usize, rng: &mut R) -> TaskId {
    let millis = at.unix_timestamp_nanos() / 1_000_000;
    let suffix: String = (0..suffix_len)
        .map(|_| {
            let idx = rng.random_range(0..ID_SUFFIX_ALPHABET.len());
            ID_SUFFIX_ALPHABET[idx] as char
        })
        .collect();
    TaskId(format!("{prefix}-{millis}-{suffix}"))
}
