use chrono::Utc;
use rand::Rng;
use tracing::debug;

use crate::model::board::Board;
use crate::model::task::{NewTask, Task, TaskUpdate};

use super::reorder::{move_between, reorder};

/// Error type for store operations. Every operation validates its ids up
/// front, so an error always means the board was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {0}")]
    TaskNotFound(String),
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    #[error("task {task} is not in column {column}")]
    NotInColumn { task: String, column: String },
}

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate an id of the form `task-<unix millis>-<9 base36 chars>` that is
/// not yet used on the board.
pub fn generate_id(board: &Board) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let suffix: String = (0..9)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect();
        let id = format!("task-{}-{}", Utc::now().timestamp_millis(), suffix);
        if !board.tasks.contains_key(&id) {
            return id;
        }
    }
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// Move a task within or between columns.
///
/// Same column: pure reorder, `new_index` refers to the list after the task
/// is taken out and is clamped. Different columns: the task is inserted at
/// `new_index` (clamped to the destination length) and its status becomes
/// `to_column`.
pub fn move_task(
    board: &mut Board,
    task_id: &str,
    from_column: &str,
    to_column: &str,
    new_index: usize,
) -> Result<(), TaskError> {
    let from_idx = board
        .column_index(from_column)
        .ok_or_else(|| TaskError::ColumnNotFound(from_column.to_string()))?;
    let to_idx = board
        .column_index(to_column)
        .ok_or_else(|| TaskError::ColumnNotFound(to_column.to_string()))?;
    let source_index =
        board.columns[from_idx]
            .index_of(task_id)
            .ok_or_else(|| TaskError::NotInColumn {
                task: task_id.to_string(),
                column: from_column.to_string(),
            })?;
    if !board.tasks.contains_key(task_id) {
        return Err(TaskError::TaskNotFound(task_id.to_string()));
    }

    if from_idx == to_idx {
        let col = &mut board.columns[from_idx];
        col.task_ids = reorder(&col.task_ids, source_index, new_index);
        debug!(task = task_id, column = from_column, from = source_index, to = new_index, "reordered task");
        return Ok(());
    }

    let (source, dest) = move_between(
        &board.columns[from_idx].task_ids,
        &board.columns[to_idx].task_ids,
        source_index,
        new_index,
    );
    board.columns[from_idx].task_ids = source;
    board.columns[to_idx].task_ids = dest;
    if let Some(task) = board.tasks.get_mut(task_id) {
        task.status = to_column.to_string();
    }
    debug!(task = task_id, from = from_column, to = to_column, index = new_index, "moved task");
    Ok(())
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// Create a task at the bottom of `column_id`. Returns the assigned id.
///
/// The task's status is always `column_id`, whatever the caller supplied.
pub fn create_task(board: &mut Board, column_id: &str, data: NewTask) -> Result<String, TaskError> {
    if board.column(column_id).is_none() {
        return Err(TaskError::ColumnNotFound(column_id.to_string()));
    }
    if let Some(status) = &data.status
        && status != column_id
    {
        debug!(requested = %status, column = column_id, "status overridden by target column");
    }

    let id = generate_id(board);
    let task = Task {
        id: id.clone(),
        title: data.title,
        description: data.description,
        status: column_id.to_string(),
        priority: data.priority,
        assignee: data.assignee,
        tags: data.tags,
        created_at: Utc::now(),
        due_date: data.due_date,
    };
    board.tasks.insert(id.clone(), task);
    if let Some(col) = board.column_mut(column_id) {
        col.task_ids.push(id.clone());
    }
    debug!(task = %id, column = column_id, "created task");
    Ok(id)
}

/// Merge a partial update into a task.
///
/// A status change relocates the task: it leaves its current column and is
/// appended to the column named by the new status. An unknown status column
/// rejects the whole update.
pub fn update_task(board: &mut Board, task_id: &str, update: TaskUpdate) -> Result<(), TaskError> {
    let current_status = board
        .tasks
        .get(task_id)
        .map(|t| t.status.clone())
        .ok_or_else(|| TaskError::TaskNotFound(task_id.to_string()))?;

    let relocate_to = match &update.status {
        Some(status) if *status != current_status => {
            if board.column(status).is_none() {
                return Err(TaskError::ColumnNotFound(status.clone()));
            }
            Some(status.clone())
        }
        _ => None,
    };

    if let Some(task) = board.tasks.get_mut(task_id) {
        update.apply_fields(task);
    }

    if let Some(target) = relocate_to {
        for col in &mut board.columns {
            col.task_ids.retain(|id| id != task_id);
        }
        if let Some(col) = board.column_mut(&target) {
            col.task_ids.push(task_id.to_string());
        }
        if let Some(task) = board.tasks.get_mut(task_id) {
            task.status = target.clone();
        }
        debug!(task = task_id, from = %current_status, to = %target, "status change relocated task");
    }
    debug!(task = task_id, "updated task");
    Ok(())
}

/// Remove a task record and every column reference to it. Idempotent;
/// returns whether anything was removed.
pub fn delete_task(board: &mut Board, task_id: &str) -> bool {
    let had_record = board.tasks.shift_remove(task_id).is_some();
    let mut had_ref = false;
    for col in &mut board.columns {
        let before = col.task_ids.len();
        col.task_ids.retain(|id| id != task_id);
        had_ref |= col.task_ids.len() != before;
    }
    if had_record || had_ref {
        debug!(task = task_id, "deleted task");
    }
    had_record || had_ref
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
