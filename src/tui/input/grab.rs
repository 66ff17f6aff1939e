use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::ops::keyboard_drag::{self, Direction};
use crate::tui::app::{App, DragSource};

/// Space on a focused card: pick it up
pub(super) fn start_grab(app: &mut App) {
    if !app.can_move_cards() {
        app.status_message = Some("clear the filter (Esc) to move cards".into());
        return;
    }
    let Some(task_id) = app.focused_task().map(|t| t.id.clone()) else {
        return;
    };
    if keyboard_drag::grab(&mut app.drag, &app.board, &task_id) {
        app.drag_source = Some(DragSource::Keyboard);
    }
}

pub(super) fn handle_grab(app: &mut App, key: KeyEvent) {
    let direction = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Direction::Right),
        _ => None,
    };
    if let Some(direction) = direction {
        keyboard_drag::step(&mut app.drag, &app.board, direction);
        return;
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            let task_id = app.drag.dragged_task().map(|s| s.to_string());
            if let Some(request) = keyboard_drag::release(&mut app.drag, &mut app.board) {
                debug!(task = %request.task_id, to = %request.to_column, index = request.index, "keyboard drop");
            }
            app.drag_source = None;
            if let Some(id) = task_id {
                app.focus_task(&id);
            }
        }
        KeyCode::Esc => {
            app.drag.end();
            app.drag_source = None;
        }
        _ => {}
    }
}
