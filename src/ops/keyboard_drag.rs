//! Keyboard-driven drag: grab a card, walk the drop target with arrow keys,
//! then drop or cancel. Drives the same [`DragState`] as pointer drags.

use crate::model::board::Board;

use super::drag::{DragState, MoveRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Grab `task_id` where it currently sits. The initial target is its own
/// slot, so dropping immediately is a no-op move.
pub fn grab(drag: &mut DragState, board: &Board, task_id: &str) -> bool {
    let Some((ci, ri)) = board.position_of(task_id) else {
        return false;
    };
    let column = board.columns[ci].id.clone();
    drag.start(task_id, column.clone());
    drag.over(&column, ri);
    true
}

/// Highest valid target index in `column_idx` for the dragged card. In its
/// own column the card is counted out, matching reorder semantics.
fn max_index(board: &Board, column_idx: usize, source_column: &str) -> usize {
    let col = &board.columns[column_idx];
    if col.id == source_column {
        col.len().saturating_sub(1)
    } else {
        col.len()
    }
}

/// Move the drop target one step. Returns true if it changed.
pub fn step(drag: &mut DragState, board: &Board, direction: Direction) -> bool {
    let (Some(source), Some(target)) = (drag.source_column(), drag.target()) else {
        return false;
    };
    let Some(ci) = board.column_index(&target.column) else {
        return false;
    };
    let source = source.to_string();
    let idx = target.index;

    let (new_ci, new_idx) = match direction {
        Direction::Up => (ci, idx.saturating_sub(1)),
        Direction::Down => (ci, (idx + 1).min(max_index(board, ci, &source))),
        Direction::Left if ci > 0 => (ci - 1, idx.min(max_index(board, ci - 1, &source))),
        Direction::Right if ci + 1 < board.columns.len() => {
            (ci + 1, idx.min(max_index(board, ci + 1, &source)))
        }
        Direction::Left | Direction::Right => return false,
    };
    let column = board.columns[new_ci].id.clone();
    drag.over(&column, new_idx)
}

/// Drop on the current target and commit it. Misses are ignored.
pub fn release(drag: &mut DragState, board: &mut Board) -> Option<MoveRequest> {
    let request = drag.drop_on_target()?;
    request.apply(board).ok().map(|()| request)
}

/// Screen-reader style label describing how to interact with a card
pub fn aria_label(title: &str, grabbed: bool) -> String {
    if grabbed {
        format!(
            "{}. Grabbed. Use arrow keys to move. Press Enter to drop. Press Escape to cancel.",
            title
        )
    } else {
        format!("{}. Press Space to grab.", title)
    }
}
