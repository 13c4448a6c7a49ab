use std::sync::Arc;

use time::macros::datetime;

use super::*;
use crate::board::Priority;

fn task(id: &str, status: &str) -> Task {
    Task::new(id, format!("Task {id}"), status, datetime!(2024-01-10 09:00:00 UTC))
}

fn stamp(id: &str) -> TaskStamp {
    TaskStamp { id: TaskId::from(id), created_at: datetime!(2024-02-01 12:00:00 UTC) }
}

/// todo=[t1,t2,t3] (limit 3), doing=[t4], done=[].
fn board() -> Board {
    Board::from_parts(
        vec![
            Column::new("todo", "To Do", "#6b7280").with_task_ids(["t1", "t2", "t3"]).with_max_tasks(3),
            Column::new("doing", "Doing", "#3b82f6").with_task_ids(["t4"]).with_max_tasks(1),
            Column::new("done", "Done", "#10b981"),
        ],
        vec![task("t1", "todo"), task("t2", "todo"), task("t3", "todo"), task("t4", "doing")],
    )
    .unwrap()
}

fn ids(board: &Board, column: &str) -> Vec<String> {
    board.column(column).unwrap().task_ids.iter().map(ToString::to_string).collect()
}

fn col_arc<'a>(board: &'a Board, column: &str) -> &'a Arc<Column> {
    &board.columns()[board.column_index(column).unwrap()]
}

// =============================================================
// Move
// =============================================================

#[test]
fn move_across_columns_updates_sequences_and_status() {
    let before = board();
    let after = before.move_task("t1", "todo", "done", 0).unwrap();

    assert_eq!(ids(&after, "todo"), vec!["t2", "t3"]);
    assert_eq!(ids(&after, "done"), vec!["t1"]);
    assert_eq!(after.task("t1").unwrap().status, "done");
    assert!(after.check_integrity().is_ok());
}

#[test]
fn move_within_column_reorders() {
    let after = board().move_task("t3", "todo", "todo", 0).unwrap();
    assert_eq!(ids(&after, "todo"), vec!["t3", "t1", "t2"]);
    assert_eq!(after.task("t3").unwrap().status, "todo");
}

#[test]
fn move_within_column_index_counts_after_removal() {
    // t1 lifted out leaves [t2, t3]; index 1 lands between them.
    let after = board().move_task("t1", "todo", "todo", 1).unwrap();
    assert_eq!(ids(&after, "todo"), vec!["t2", "t1", "t3"]);
}

#[test]
fn move_to_own_index_keeps_column_shared() {
    let before = board();
    let after = before.move_task("t2", "todo", "todo", 1).unwrap();
    assert_eq!(after, before);
    assert!(Arc::ptr_eq(col_arc(&before, "todo"), col_arc(&after, "todo")));
}

#[test]
fn move_clamps_target_index() {
    let after = board().move_task("t1", "todo", "todo", 50).unwrap();
    assert_eq!(ids(&after, "todo"), vec!["t2", "t3", "t1"]);

    let after = board().move_task("t1", "todo", "doing", 50).unwrap();
    assert_eq!(ids(&after, "doing"), vec!["t4", "t1"]);
}

#[test]
fn move_ignores_wip_limit() {
    let after = board().move_task("t1", "todo", "doing", 0).unwrap();
    assert_eq!(ids(&after, "doing"), vec!["t1", "t4"]);
    assert_eq!(after.column("doing").unwrap().max_tasks, Some(1));
}

#[test]
fn move_leaves_unrelated_entries_shared() {
    let before = board();
    let after = before.move_task("t1", "todo", "done", 0).unwrap();

    assert!(Arc::ptr_eq(col_arc(&before, "doing"), col_arc(&after, "doing")));
    assert!(!Arc::ptr_eq(col_arc(&before, "todo"), col_arc(&after, "todo")));
    for id in ["t2", "t3", "t4"] {
        assert!(Arc::ptr_eq(&before.tasks()[id], &after.tasks()[id]), "{id} should be shared");
    }
    assert!(!Arc::ptr_eq(&before.tasks()["t1"], &after.tasks()["t1"]));
}

#[test]
fn move_with_wrong_source_column_fails() {
    let err = board().move_task("t4", "todo", "done", 0).unwrap_err();
    assert_eq!(err, BoardError::TaskNotInColumn { task: TaskId::from("t4"), column: ColumnId::from("todo") });
}

#[test]
fn move_with_missing_columns_fails() {
    assert!(matches!(board().move_task("t1", "nope", "done", 0), Err(BoardError::ColumnNotFound(_))));
    assert!(matches!(board().move_task("t1", "todo", "nope", 0), Err(BoardError::ColumnNotFound(_))));
}

#[test]
fn move_of_deleted_task_fails() {
    let b = board().delete_task("t1").unwrap();
    assert!(b.move_task("t1", "todo", "done", 0).unwrap_err().is_referential_miss());
}

#[test]
fn move_does_not_touch_input() {
    let before = board();
    let snapshot = before.clone();
    let _after = before.move_task("t1", "todo", "done", 0).unwrap();
    assert_eq!(before, snapshot);
}

// =============================================================
// Create
// =============================================================

#[test]
fn create_appends_to_column() {
    let draft = TaskDraft { priority: Some(Priority::High), ..TaskDraft::new("Write docs") };
    let after = board().create_task("doing", draft, stamp("new-1")).unwrap();

    assert_eq!(ids(&after, "doing"), vec!["t4", "new-1"]);
    let created = after.task("new-1").unwrap();
    assert_eq!(created.status, "doing");
    assert_eq!(created.title, "Write docs");
    assert_eq!(created.priority, Some(Priority::High));
    assert_eq!(created.created_at, datetime!(2024-02-01 12:00:00 UTC));
    assert!(after.check_integrity().is_ok());
}

#[test]
fn create_into_empty_column() {
    let after = board().create_task("done", TaskDraft::new("x"), stamp("n")).unwrap();
    assert_eq!(ids(&after, "done"), vec!["n"]);
}

#[test]
fn create_rejects_missing_column_and_duplicate_id() {
    assert!(matches!(
        board().create_task("nope", TaskDraft::new("x"), stamp("n")),
        Err(BoardError::ColumnNotFound(_))
    ));
    assert_eq!(
        board().create_task("done", TaskDraft::new("x"), stamp("t2")).unwrap_err(),
        BoardError::DuplicateTask(TaskId::from("t2"))
    );
}

#[test]
fn create_does_not_validate_title() {
    let after = board().create_task("todo", TaskDraft::new(""), stamp("blank")).unwrap();
    assert_eq!(after.task("blank").unwrap().title, "");
}

// =============================================================
// Update
// =============================================================

#[test]
fn update_merges_fields_without_moving() {
    let before = board();
    let after = before.update_task("t2", &TaskPatch::default().with_title("Renamed")).unwrap();

    assert_eq!(after.task("t2").unwrap().title, "Renamed");
    assert_eq!(ids(&after, "todo"), vec!["t1", "t2", "t3"]);
    for column in ["todo", "doing", "done"] {
        assert!(Arc::ptr_eq(col_arc(&before, column), col_arc(&after, column)));
    }
}

#[test]
fn update_with_new_status_appends_to_destination() {
    let after = board().update_task("t1", &TaskPatch::default().with_status("doing")).unwrap();
    assert_eq!(ids(&after, "todo"), vec!["t2", "t3"]);
    assert_eq!(ids(&after, "doing"), vec!["t4", "t1"]);
    assert_eq!(after.task("t1").unwrap().status, "doing");
    assert!(after.check_integrity().is_ok());
}

#[test]
fn update_with_same_status_keeps_position() {
    let after = board().update_task("t2", &TaskPatch::default().with_status("todo").with_title("x")).unwrap();
    assert_eq!(ids(&after, "todo"), vec!["t1", "t2", "t3"]);
}

#[test]
fn update_to_unknown_status_changes_nothing() {
    let err = board().update_task("t1", &TaskPatch::default().with_status("archive").with_title("x")).unwrap_err();
    assert_eq!(err, BoardError::ColumnNotFound(ColumnId::from("archive")));
}

#[test]
fn update_missing_task_fails() {
    assert_eq!(
        board().update_task("ghost", &TaskPatch::default().with_title("x")).unwrap_err(),
        BoardError::TaskNotFound(TaskId::from("ghost"))
    );
}

#[test]
fn noop_update_shares_task_entry() {
    let before = board();
    let after = before.update_task("t1", &TaskPatch::default().with_title("Task t1")).unwrap();
    assert!(Arc::ptr_eq(&before.tasks()["t1"], &after.tasks()["t1"]));
}

#[test]
fn update_preserves_identity_fields() {
    let before = board();
    let after = before.update_task("t3", &TaskPatch::default().with_tags(vec!["x".into()])).unwrap();
    let (old, new) = (before.task("t3").unwrap(), after.task("t3").unwrap());
    assert_eq!(new.id, old.id);
    assert_eq!(new.created_at, old.created_at);
    assert_eq!(new.tags, vec!["x".to_string()]);
}

// =============================================================
// Delete
// =============================================================

#[test]
fn delete_removes_from_column_and_store() {
    let before = board();
    let after = before.delete_task("t2").unwrap();
    assert_eq!(ids(&after, "todo"), vec!["t1", "t3"]);
    assert!(after.task("t2").is_none());
    assert_eq!(after.len(), 3);
    assert!(Arc::ptr_eq(col_arc(&before, "doing"), col_arc(&after, "doing")));
    assert!(after.check_integrity().is_ok());
}

#[test]
fn delete_missing_task_fails_and_repeat_delete_fails() {
    let after = board().delete_task("t4").unwrap();
    assert!(matches!(after.delete_task("t4"), Err(BoardError::TaskNotFound(_))));
    assert!(matches!(board().delete_task("ghost"), Err(BoardError::TaskNotFound(_))));
}
