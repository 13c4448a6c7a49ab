//! In-memory state engine for a drag-and-drop task board.
//!
//! A board is an ordered set of columns, each holding an ordered sequence of
//! task ids, plus a store of task records keyed by id. This crate owns the
//! rules that keep the two consistent while tasks are moved, created, edited
//! and deleted, and the geometry that turns a pointer position into an
//! insertion index during drag-over. Rendering is left to the host, which
//! wires its events to [`engine::BoardEngine`] and redraws on each returned
//! [`engine::Change`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`board`] | Columns, tasks, and the immutable [`board::Board`] snapshot |
//! | [`ops`] | Move, create, update and delete on a snapshot |
//! | [`reorder`] | Ordered-sequence move primitives |
//! | [`engine`] | Action reducer and the host-owned [`engine::BoardEngine`] |
//! | [`drag`] | Drag gesture state |
//! | [`drop_position`] | Pointer offset to insertion index |
//! | [`wip`] | Advisory WIP-limit signals |
//! | [`form`] | Task form state and validation |
//! | [`display`] | Card text helpers (due labels, initials, truncation) |
//! | [`sample`] | Demo and randomly generated boards |
//! | [`config`] | Environment-driven configuration |
//! | [`ids`] | Id newtypes and task-id generation |
//! | [`error`] | Error types and codes |
//! | [`consts`] | Shared constants |

pub mod board;
pub mod config;
pub mod consts;
pub mod display;
pub mod drag;
pub mod drop_position;
pub mod engine;
pub mod error;
pub mod form;
pub mod ids;
pub mod ops;
pub mod reorder;
pub mod sample;
pub mod wip;

pub use board::{Board, Column, Priority, Task, TaskDraft, TaskPatch};
pub use config::BoardConfig;
pub use drag::{DragState, DropTarget};
pub use drop_position::{ElementBounds, insertion_index};
pub use engine::{Action, BoardEngine, Change, reduce};
pub use error::{BoardError, ErrorCode, Violation};
pub use form::{FieldErrors, FormField, TaskForm};
pub use ids::{ClockIdSource, ColumnId, IdSource, TaskId, TaskStamp};
pub use sample::{mock_board, sample_board};
pub use wip::{WipLevel, WipStatus, is_column_at_limit, wip_status};
