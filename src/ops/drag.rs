use tracing::trace;

use crate::model::board::Board;

use super::reorder::resolve_drop_index;
use super::task_ops::{self, TaskError};

/// Where a dragged card would land
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub column: String,
    pub index: usize,
}

/// A move produced by a completed drop, ready to hand to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub task_id: String,
    pub from_column: String,
    pub to_column: String,
    pub index: usize,
}

impl MoveRequest {
    /// Commit this move to the board
    pub fn apply(&self, board: &mut Board) -> Result<(), TaskError> {
        task_ops::move_task(
            board,
            &self.task_id,
            &self.from_column,
            &self.to_column,
            self.index,
        )
    }
}

/// Drag gesture state. Lives only between a drag start and its end or drop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        task_id: String,
        source_column: String,
        target: Option<DropTarget>,
    },
}

impl DragState {
    /// Begin dragging `task_id` out of `source_column`. Replaces any session
    /// already in progress.
    pub fn start(&mut self, task_id: impl Into<String>, source_column: impl Into<String>) {
        let task_id = task_id.into();
        let source_column = source_column.into();
        trace!(task = %task_id, column = %source_column, "drag start");
        *self = DragState::Dragging {
            task_id,
            source_column,
            target: None,
        };
    }

    /// Update the hovered drop target. Returns true if the target changed;
    /// ignored while idle.
    pub fn over(&mut self, column: &str, index: usize) -> bool {
        let DragState::Dragging { target, .. } = self else {
            return false;
        };
        if let Some(t) = target
            && t.column == column
            && t.index == index
        {
            return false;
        }
        trace!(column, index, "drag over");
        *target = Some(DropTarget {
            column: column.to_string(),
            index,
        });
        true
    }

    /// End the gesture without committing anything
    pub fn end(&mut self) {
        if self.is_dragging() {
            trace!("drag end");
        }
        *self = DragState::Idle;
    }

    /// Finish the gesture on `column` at `index`. Always returns to idle.
    /// Yields the move to commit, or `None` if nothing was being dragged.
    pub fn drop_on(&mut self, column: &str, index: usize) -> Option<MoveRequest> {
        match std::mem::take(self) {
            DragState::Idle => None,
            DragState::Dragging {
                task_id,
                source_column,
                ..
            } => Some(MoveRequest {
                task_id,
                from_column: source_column,
                to_column: column.to_string(),
                index,
            }),
        }
    }

    /// Drop on the last hovered target, if there is one. Always returns to
    /// idle.
    pub fn drop_on_target(&mut self) -> Option<MoveRequest> {
        let target = self.target().cloned();
        match target {
            Some(t) => self.drop_on(&t.column, t.index),
            None => {
                self.end();
                None
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn dragged_task(&self) -> Option<&str> {
        match self {
            DragState::Dragging { task_id, .. } => Some(task_id),
            DragState::Idle => None,
        }
    }

    pub fn source_column(&self) -> Option<&str> {
        match self {
            DragState::Dragging { source_column, .. } => Some(source_column),
            DragState::Idle => None,
        }
    }

    pub fn target(&self) -> Option<&DropTarget> {
        match self {
            DragState::Dragging { target, .. } => target.as_ref(),
            DragState::Idle => None,
        }
    }

    /// Whether `column` is the current drop target (for highlighting)
    pub fn is_over(&self, column: &str) -> bool {
        self.target().is_some_and(|t| t.column == column)
    }
}

/// Complete a drop against the board: clamp the index to the destination
/// column (empty columns resolve to 0), reset the tracker, then commit.
///
/// Returns the committed move. Referential misses are swallowed so a stale
/// gesture can never disturb the board.
pub fn drop_and_commit(
    drag: &mut DragState,
    board: &mut Board,
    column: &str,
    reported_index: usize,
) -> Option<MoveRequest> {
    let len = board.column(column).map_or(0, |c| c.len());
    let request = drag.drop_on(column, resolve_drop_index(len, reported_index))?;
    match request.apply(board) {
        Ok(()) => Some(request),
        Err(e) => {
            trace!(error = %e, "drop ignored");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::column::Column;
    use crate::model::task::Task;

    fn board() -> Board {
        let mut todo = Column::new("todo", "To Do");
        todo.task_ids = vec!["a".into(), "b".into()];
        let doing = Column::new("doing", "Doing");
        Board::from_parts(
            "T",
            vec![todo, doing],
            vec![Task::new("a", "A", "todo"), Task::new("b", "B", "todo")],
        )
    }

    #[test]
    fn test_start_records_source() {
        let mut drag = DragState::default();
        assert!(!drag.is_dragging());
        drag.start("a", "todo");
        assert_eq!(drag.dragged_task(), Some("a"));
        assert_eq!(drag.source_column(), Some("todo"));
        assert_eq!(drag.target(), None);
    }

    #[test]
    fn test_over_updates_target_once() {
        let mut drag = DragState::default();
        assert!(!drag.over("todo", 0)); // idle
        drag.start("a", "todo");
        assert!(drag.over("doing", 0));
        assert!(!drag.over("doing", 0));
        assert!(drag.over("doing", 1));
        assert!(drag.is_over("doing"));
        assert!(!drag.is_over("todo"));
    }

    #[test]
    fn test_end_resets() {
        let mut drag = DragState::default();
        drag.start("a", "todo");
        drag.over("doing", 0);
        drag.end();
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn test_drop_without_drag_is_ignored() {
        let mut drag = DragState::default();
        assert_eq!(drag.drop_on("todo", 0), None);
        assert_eq!(drag.drop_on_target(), None);
    }

    #[test]
    fn test_drop_yields_move_and_resets() {
        let mut drag = DragState::default();
        drag.start("a", "todo");
        let req = drag.drop_on("doing", 3).unwrap();
        assert_eq!(
            req,
            MoveRequest {
                task_id: "a".into(),
                from_column: "todo".into(),
                to_column: "doing".into(),
                index: 3,
            }
        );
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_drop_on_target_without_hover_cancels() {
        let mut drag = DragState::default();
        drag.start("a", "todo");
        assert_eq!(drag.drop_on_target(), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_drop_into_empty_column_targets_zero() {
        let mut b = board();
        let mut drag = DragState::default();
        drag.start("b", "todo");
        let req = drop_and_commit(&mut drag, &mut b, "doing", 7).unwrap();
        assert_eq!(req.index, 0);
        assert_eq!(b.column("doing").unwrap().task_ids, vec!["b"]);
        assert_eq!(b.task("b").unwrap().status, "doing");
    }

    #[test]
    fn test_stale_drop_does_not_touch_board() {
        let mut b = board();
        let mut drag = DragState::default();
        drag.start("a", "doing"); // wrong source
        let before = b.clone();
        assert_eq!(drop_and_commit(&mut drag, &mut b, "todo", 0), None);
        assert_eq!(b, before);
        assert!(!drag.is_dragging());
    }
}
