use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use tracing::debug;

use crate::ops::drag;
use crate::tui::app::{App, DragSource, Mode};

/// Pointer drag: press on a card starts it, moving updates the drop target,
/// release over a column commits. Releasing anywhere else cancels.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.mode != Mode::Navigate || app.show_help {
        return;
    }
    // A keyboard grab in progress keeps the pointer out
    if app.drag_source == Some(DragSource::Keyboard) {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => press(app, mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(hit) = app.hit_test(mouse.column, mouse.row) {
                let index = app.drop_index(&hit);
                if let Some(column) = app.board.columns.get(hit.column).map(|c| c.id.clone()) {
                    app.drag.over(&column, index);
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => release(app, mouse.column, mouse.row),
        MouseEventKind::ScrollDown => scroll(app, mouse.column, mouse.row, 1),
        MouseEventKind::ScrollUp => scroll(app, mouse.column, mouse.row, -1),
        _ => {}
    }
}

fn press(app: &mut App, x: u16, y: u16) {
    let Some(hit) = app.hit_test(x, y) else {
        return;
    };
    app.cursor_col = hit.column;
    let Some(task) = app.visible_tasks(hit.column).get(hit.slot).copied() else {
        app.clamp_cursor();
        return;
    };
    let task_id = task.id.clone();
    app.cursor_row = hit.slot;
    if !app.can_move_cards() {
        return;
    }
    let Some(column) = app.focused_column_id().map(|s| s.to_string()) else {
        return;
    };
    app.drag.start(task_id, column);
    app.drag_source = Some(DragSource::Mouse);
}

fn release(app: &mut App, x: u16, y: u16) {
    if !app.drag.is_dragging() {
        return;
    }
    let task_id = app.drag.dragged_task().map(|s| s.to_string());
    match app.hit_test(x, y) {
        Some(hit) => {
            let index = app.drop_index(&hit);
            let column = app.board.columns.get(hit.column).map(|c| c.id.clone());
            if let Some(column) = column
                && let Some(request) =
                    drag::drop_and_commit(&mut app.drag, &mut app.board, &column, index)
            {
                debug!(task = %request.task_id, to = %request.to_column, index = request.index, "mouse drop");
            }
        }
        None => {
            debug!("drop outside any column");
        }
    }
    app.drag.end();
    app.drag_source = None;
    if let Some(id) = task_id {
        app.focus_task(&id);
    }
}

fn scroll(app: &mut App, x: u16, y: u16, delta: isize) {
    let Some(hit) = app.hit_test(x, y) else {
        return;
    };
    let Some(area) = app.layout.get(hit.column) else {
        return;
    };
    let viewport = area.list.height as usize;
    let total = app.visible_tasks(hit.column).len() * crate::tui::app::CARD_HEIGHT;
    let max = total.saturating_sub(viewport);
    if let Some(s) = app.scroll.get_mut(hit.column) {
        *s = s.saturating_add_signed(delta).min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UiConfig;
    use crate::ops::sample;
    use crate::tui::app::ColumnArea;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    /// Two 20-wide columns from the sample board, cards starting at row 1
    fn app() -> App {
        let mut app = App::new(sample::default_board(), &UiConfig::default());
        app.layout = vec![
            ColumnArea {
                column_id: "todo".into(),
                area: Rect::new(0, 0, 20, 20),
                list: Rect::new(1, 1, 18, 18),
            },
            ColumnArea {
                column_id: "in-progress".into(),
                area: Rect::new(20, 0, 20, 20),
                list: Rect::new(21, 1, 18, 18),
            },
        ];
        app
    }

    fn mouse(app: &mut App, kind: MouseEventKind, x: u16, y: u16) {
        handle_mouse(
            app,
            MouseEvent {
                kind,
                column: x,
                row: y,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    #[test]
    fn drag_card_to_other_column() {
        let mut app = app();
        // Second card spans rows 4..=6 with its title on row 5
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 5);
        assert_eq!(app.drag.dragged_task(), Some("task-2"));
        // Over the top of the first card in progress
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 25, 1);
        assert!(app.drag.is_over("in-progress"));
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 25, 1);

        assert!(!app.drag.is_dragging());
        assert_eq!(app.board.columns[1].task_ids, vec!["task-2", "task-3"]);
        assert_eq!(app.board.task("task-2").unwrap().status, "in-progress");
        assert_eq!((app.cursor_col, app.cursor_row), (1, 0));
    }

    #[test]
    fn drag_card_down_its_own_column() {
        let mut app = app();
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 2);
        assert_eq!(app.drag.dragged_task(), Some("task-1"));
        // Below both cards
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 12);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 5, 12);
        assert_eq!(app.board.columns[0].task_ids, vec!["task-2", "task-1"]);
    }

    #[test]
    fn release_outside_columns_cancels() {
        let mut app = app();
        let before = app.board.clone();
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 2);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 25, 2);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 60, 2);
        assert!(!app.drag.is_dragging());
        assert_eq!(app.board, before);
    }

    #[test]
    fn click_on_card_without_moving_is_noop() {
        let mut app = app();
        let before = app.board.clone();
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 5);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 5, 5);
        assert_eq!(app.board, before);
        assert_eq!(app.focused_task().map(|t| t.id.as_str()), Some("task-2"));
    }

    #[test]
    fn press_on_empty_area_only_focuses() {
        let mut app = app();
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 25, 10);
        assert!(!app.drag.is_dragging());
        assert_eq!(app.cursor_col, 1);
    }
}
