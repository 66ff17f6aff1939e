//! End-to-end board behavior through the public library API: store
//! operations, drag sessions, the create/edit modal and filtering.

use chrono::Utc;
use pretty_assertions::assert_eq;

use kanban::model::board::Board;
use kanban::model::column::{Column, WipStatus, wip_status};
use kanban::model::task::{NewTask, Priority, Task, TaskUpdate};
use kanban::ops::drag::{DragState, drop_and_commit};
use kanban::ops::form::FormField;
use kanban::ops::keyboard_drag::{self, Direction};
use kanban::ops::modal::{SaveError, TaskModal};
use kanban::ops::reorder::reorder;
use kanban::ops::sample;
use kanban::ops::search::{SearchFilters, filter_tasks};
use kanban::ops::task_ops::{TaskError, create_task, delete_task, move_task, update_task};

/// Three columns, `t1` in todo
fn three_columns() -> Board {
    let mut todo = Column::new("todo", "To Do");
    todo.task_ids = vec!["t1".into()];
    Board::from_parts(
        "Scenario",
        vec![todo, Column::new("doing", "Doing"), Column::new("done", "Done")],
        vec![Task::new("t1", "First", "todo")],
    )
}

fn ids(board: &Board, column: &str) -> Vec<String> {
    board.column(column).unwrap().task_ids.clone()
}

/// Each task appears in exactly one column, matching its status
fn assert_consistent(board: &Board) {
    assert_eq!(board.consistency_problems(), Vec::<String>::new());
    for task in board.tasks.values() {
        let holders = board.columns.iter().filter(|c| c.contains(&task.id)).count();
        assert_eq!(holders, 1, "{} held by {} columns", task.id, holders);
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[test]
fn created_ids_are_unique_and_timestamped() {
    let mut board = three_columns();
    let before = Utc::now();
    let created: Vec<String> = (0..50)
        .map(|i| create_task(&mut board, "todo", NewTask::titled(format!("Task {}", i))).unwrap())
        .collect();
    let after = Utc::now();

    let mut unique = created.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 50);
    for id in &created {
        assert!(id.starts_with("task-"));
        let at = board.task(id).unwrap().created_at;
        assert!(before <= at && at <= after);
    }
    assert_eq!(board.column("todo").unwrap().len(), 51);
    assert_eq!(ids(&board, "todo").last(), created.last());
    assert_consistent(&board);
}

#[test]
fn create_uses_target_column_as_status() {
    let mut board = three_columns();
    let data = NewTask {
        status: Some("done".into()),
        ..NewTask::titled("Misfiled")
    };
    let id = create_task(&mut board, "doing", data).unwrap();
    assert_eq!(board.task(&id).unwrap().status, "doing");
    assert_eq!(ids(&board, "doing"), vec![id]);
    assert!(ids(&board, "done").is_empty());
}

#[test]
fn create_in_unknown_column_leaves_board_alone() {
    let mut board = three_columns();
    let before = board.clone();
    let err = create_task(&mut board, "nope", NewTask::titled("X")).unwrap_err();
    assert_eq!(err, TaskError::ColumnNotFound("nope".into()));
    assert_eq!(board, before);
}

#[test]
fn todo_doing_done_scenario() {
    let mut board = three_columns();
    move_task(&mut board, "t1", "todo", "doing", 0).unwrap();
    assert!(ids(&board, "todo").is_empty());
    assert_eq!(ids(&board, "doing"), vec!["t1"]);
    assert_eq!(board.task("t1").unwrap().status, "doing");

    move_task(&mut board, "t1", "doing", "done", 99).unwrap();
    assert_eq!(ids(&board, "done"), vec!["t1"]);
    assert_eq!(board.task("t1").unwrap().status, "done");
    assert_consistent(&board);
}

#[test]
fn same_column_move_is_a_permutation() {
    let mut board = sample::large_board(24, Some(3));
    let col = board.columns[0].id.clone();
    let before = ids(&board, &col);
    let n = before.len();
    for (from, to) in [(0, n - 1), (n - 1, 0), (2, 4), (3, 3), (1, 99)] {
        let task = ids(&board, &col)[from].clone();
        move_task(&mut board, &task, &col, &col, to).unwrap();
        let mut after = ids(&board, &col);
        assert_eq!(after.len(), n);
        assert_eq!(after[to.min(n - 1)], task);
        after.sort();
        let mut sorted = before.clone();
        sorted.sort();
        assert_eq!(after, sorted);
    }
    assert_consistent(&board);
}

#[test]
fn reorder_to_same_index_is_identity() {
    let list = vec!["a", "b", "c", "d"];
    for i in 0..list.len() {
        assert_eq!(reorder(&list, i, i), list);
    }
    assert_eq!(reorder(&["a", "b", "c"], 0, 2), vec!["b", "c", "a"]);
}

#[test]
fn move_after_delete_is_a_no_op() {
    let mut board = sample::default_board();
    assert!(delete_task(&mut board, "task-1"));
    let snapshot = board.clone();

    let err = move_task(&mut board, "task-1", "todo", "done", 0).unwrap_err();
    assert!(matches!(err, TaskError::NotInColumn { .. }));
    assert_eq!(board, snapshot);
    assert!(board.columns.iter().all(|c| !c.contains("task-1")));
    assert!(!delete_task(&mut board, "task-1"));
}

#[test]
fn update_merges_and_relocates_on_status_change() {
    let mut board = sample::default_board();
    update_task(
        &mut board,
        "task-2",
        TaskUpdate {
            title: Some("Design modal".into()),
            assignee: Some(None),
            ..Default::default()
        },
    )
    .unwrap();
    let t = board.task("task-2").unwrap();
    assert_eq!(t.title, "Design modal");
    assert_eq!(t.assignee, None);
    assert_eq!(t.priority, Some(Priority::Medium));
    assert_eq!(ids(&board, "todo"), vec!["task-1", "task-2"]);

    update_task(
        &mut board,
        "task-1",
        TaskUpdate {
            status: Some("review".into()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(ids(&board, "todo"), vec!["task-2"]);
    assert_eq!(ids(&board, "review"), vec!["task-1"]);
    assert_consistent(&board);

    let before = board.clone();
    let err = update_task(
        &mut board,
        "task-1",
        TaskUpdate {
            title: Some("Lost".into()),
            status: Some("archive".into()),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert_eq!(err, TaskError::ColumnNotFound("archive".into()));
    assert_eq!(board, before);
}

// ---------------------------------------------------------------------------
// Drag sessions
// ---------------------------------------------------------------------------

#[test]
fn pointer_drag_across_columns() {
    let mut board = sample::default_board();
    let mut drag = DragState::default();
    drag.start("task-2", "todo");
    assert!(drag.over("in-progress", 0));
    assert!(!drag.over("in-progress", 0));
    assert!(drag.is_over("in-progress"));

    let request = drop_and_commit(&mut drag, &mut board, "in-progress", 0).unwrap();
    assert_eq!(request.to_column, "in-progress");
    assert!(!drag.is_dragging());
    assert_eq!(ids(&board, "in-progress"), vec!["task-2", "task-3"]);
    assert_eq!(board.task("task-2").unwrap().status, "in-progress");
    assert_consistent(&board);
}

#[test]
fn drop_into_empty_column_lands_at_top() {
    let mut board = sample::default_board();
    let mut drag = DragState::default();
    drag.start("task-3", "in-progress");
    let request = drop_and_commit(&mut drag, &mut board, "review", 5).unwrap();
    assert_eq!(request.index, 0);
    assert_eq!(ids(&board, "review"), vec!["task-3"]);
    assert!(ids(&board, "in-progress").is_empty());
}

#[test]
fn cancelled_drag_changes_nothing() {
    let mut board = sample::default_board();
    let before = board.clone();
    let mut drag = DragState::default();
    drag.start("task-1", "todo");
    drag.over("done", 1);
    drag.end();
    assert_eq!(drag, DragState::Idle);
    assert_eq!(drop_and_commit(&mut drag, &mut board, "done", 0), None);
    assert_eq!(board, before);
}

#[test]
fn stale_drag_of_deleted_task_is_ignored() {
    let mut board = sample::default_board();
    let mut drag = DragState::default();
    drag.start("task-1", "todo");
    delete_task(&mut board, "task-1");
    let before = board.clone();
    assert_eq!(drop_and_commit(&mut drag, &mut board, "done", 0), None);
    assert_eq!(board, before);
}

#[test]
fn keyboard_drag_walks_and_drops() {
    let mut board = sample::default_board();
    let mut drag = DragState::default();
    assert!(keyboard_drag::grab(&mut drag, &board, "task-1"));

    // Down inside its own column: one other card, so index 1 is the floor
    assert!(keyboard_drag::step(&mut drag, &board, Direction::Down));
    assert!(!keyboard_drag::step(&mut drag, &board, Direction::Down));
    assert!(keyboard_drag::step(&mut drag, &board, Direction::Right));
    assert_eq!(drag.target().unwrap().column, "in-progress");
    assert_eq!(drag.target().unwrap().index, 1);

    let request = keyboard_drag::release(&mut drag, &mut board).unwrap();
    assert_eq!(request.from_column, "todo");
    assert_eq!(ids(&board, "in-progress"), vec!["task-3", "task-1"]);
    assert_eq!(ids(&board, "todo"), vec!["task-2"]);
    assert_consistent(&board);
}

#[test]
fn keyboard_grab_then_release_in_place_is_a_no_op() {
    let mut board = sample::default_board();
    let before = board.clone();
    let mut drag = DragState::default();
    keyboard_drag::grab(&mut drag, &board, "task-2");
    keyboard_drag::release(&mut drag, &mut board);
    assert_eq!(board, before);
}

// ---------------------------------------------------------------------------
// Modal
// ---------------------------------------------------------------------------

#[test]
fn modal_rejects_blank_title_and_status() {
    let mut board = sample::default_board();
    let before = board.clone();
    let mut modal = TaskModal::create(&board, "todo");
    modal.form.set(FormField::Title, "   ");
    modal.form.set(FormField::Status, "");

    let err = modal.save(&mut board).unwrap_err();
    let SaveError::Invalid(errors) = err else {
        panic!("expected validation errors");
    };
    assert_eq!(errors.get(&FormField::Title).map(String::as_str), Some("Title is required"));
    assert_eq!(errors.get(&FormField::Status).map(String::as_str), Some("Status is required"));
    assert_eq!(board, before);
}

#[test]
fn modal_create_and_edit_round_trip() {
    let mut board = sample::default_board();
    let mut modal = TaskModal::create(&board, "review");
    modal.form.set(FormField::Title, "  Write release notes ");
    modal.form.set(FormField::Tags, "docs, , release");
    modal.form.set(FormField::DueDate, "2024-02-01");
    modal.form.set_priority(Priority::Low);
    let id = modal.save(&mut board).unwrap();

    let task = board.task(&id).unwrap().clone();
    assert_eq!(task.title, "Write release notes");
    assert_eq!(task.status, "review");
    assert_eq!(task.tags, vec!["docs", "release"]);
    assert_eq!(task.due_date.unwrap().to_string(), "2024-02-01");
    assert_eq!(ids(&board, "review"), vec![id.clone()]);

    let mut edit = TaskModal::edit(&task);
    edit.form.set(FormField::Status, "done");
    edit.form.set(FormField::Assignee, "Alice Johnson");
    assert_eq!(edit.save(&mut board).unwrap(), id);
    assert_eq!(ids(&board, "done"), vec!["task-4".to_string(), id.clone()]);
    assert_eq!(board.task(&id).unwrap().assignee.as_deref(), Some("Alice Johnson"));

    assert!(edit.delete(&mut board));
    assert!(board.task(&id).is_none());
    assert_consistent(&board);
}

// ---------------------------------------------------------------------------
// Filtering and WIP
// ---------------------------------------------------------------------------

#[test]
fn filters_combine_with_and() {
    let board = sample::default_board();
    let filters = SearchFilters {
        query: String::new(),
        priority: None,
        assignee: Some("John Doe".into()),
        tags: vec!["setup".into(), "design".into()],
    };
    let hits: Vec<&str> = filter_tasks(&board, &filters).iter().map(|t| t.id.as_str()).collect();
    assert_eq!(hits, vec!["task-3"]);

    let all = filter_tasks(&board, &SearchFilters::default());
    assert_eq!(all.len(), 4);
}

#[test]
fn wip_thresholds() {
    assert_eq!(wip_status(3, Some(5)), WipStatus::Safe);
    assert_eq!(wip_status(4, Some(5)), WipStatus::Warning);
    assert_eq!(wip_status(5, Some(5)), WipStatus::Warning);
    assert_eq!(wip_status(6, Some(5)), WipStatus::Exceeded);
    assert_eq!(wip_status(100, None), WipStatus::Safe);

    let mut board = sample::default_board();
    for title in ["A", "B", "C", "D"] {
        create_task(&mut board, "review", NewTask::titled(title)).unwrap();
    }
    assert_eq!(board.column("review").unwrap().wip_status(), WipStatus::Exceeded);
}
