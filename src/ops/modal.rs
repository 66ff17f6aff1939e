use crate::model::board::Board;
use crate::model::task::Task;

use super::form::{FormErrors, TaskForm};
use super::task_ops::{self, TaskError};

/// What the modal was opened for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMode {
    /// New task; `column` is where the create button was pressed
    Create { column: String },
    Edit { task_id: String },
}

/// Why a save did not go through
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(FormErrors),
    #[error(transparent)]
    Store(#[from] TaskError),
}

/// A create/edit session: the draft plus where it will be committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskModal {
    pub mode: ModalMode,
    pub form: TaskForm,
}

impl TaskModal {
    /// Open a blank form for a new task in `column`. The status select
    /// starts on that column.
    pub fn create(board: &Board, column: &str) -> Self {
        let mut form = TaskForm::blank(&board.columns);
        if board.column(column).is_some() {
            form.status = column.to_string();
        }
        TaskModal {
            mode: ModalMode::Create {
                column: column.to_string(),
            },
            form,
        }
    }

    /// Open a prefilled form for an existing task
    pub fn edit(task: &Task) -> Self {
        TaskModal {
            mode: ModalMode::Edit {
                task_id: task.id.clone(),
            },
            form: TaskForm::for_task(task),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            ModalMode::Create { .. } => "Create Task",
            ModalMode::Edit { .. } => "Edit Task",
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, ModalMode::Edit { .. })
    }

    /// Validate and commit. Returns the id of the created or updated task.
    ///
    /// On a validation failure the board is untouched and the modal keeps
    /// its errors so the caller can leave it open.
    pub fn save(&mut self, board: &mut Board) -> Result<String, SaveError> {
        let update = self.form.submit().map_err(SaveError::Invalid)?;
        match &self.mode {
            ModalMode::Edit { task_id } => {
                task_ops::update_task(board, task_id, update)?;
                Ok(task_id.clone())
            }
            ModalMode::Create { column } => {
                let target = match update.status.as_deref() {
                    Some(s) if !s.is_empty() => s.to_string(),
                    _ => column.clone(),
                };
                let id = task_ops::create_task(board, &target, update.into_new_task())?;
                Ok(id)
            }
        }
    }

    /// Delete the edited task. Create sessions have nothing to delete.
    pub fn delete(&self, board: &mut Board) -> bool {
        match &self.mode {
            ModalMode::Edit { task_id } => task_ops::delete_task(board, task_id),
            ModalMode::Create { .. } => false,
        }
    }
}
