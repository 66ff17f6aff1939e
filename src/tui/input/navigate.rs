use crossterm::event::{KeyCode, KeyEvent};

use crate::model::task::Priority;
use crate::ops::modal::TaskModal;
use crate::ops::search;
use crate::tui::app::{App, ModalState, Mode};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts everything until closed
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    // A keyboard grab owns the arrow keys until it is dropped or cancelled
    if app.drag.is_dragging() {
        handle_grab(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        KeyCode::Up | KeyCode::Char('k') => move_row(app, -1),
        KeyCode::Down | KeyCode::Char('j') => move_row(app, 1),
        KeyCode::Left | KeyCode::Char('h') => move_column(app, -1),
        KeyCode::Right | KeyCode::Char('l') => move_column(app, 1),
        KeyCode::Char('g') | KeyCode::Home => {
            app.cursor_row = 0;
            app.reveal_cursor();
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor_row = app.visible_tasks(app.cursor_col).len().saturating_sub(1);
            app.reveal_cursor();
        }

        KeyCode::Char(' ') => start_grab(app),
        KeyCode::Enter | KeyCode::Char('e') => open_edit(app),
        KeyCode::Char('n') => open_create(app),

        KeyCode::Char('/') => {
            app.search_input = app.filters.query.clone();
            app.mode = Mode::Search;
        }
        KeyCode::Char('p') => {
            app.filters.priority = cycle_priority(app.filters.priority);
            app.clamp_cursor();
        }
        KeyCode::Char('a') => {
            let names = search::unique_assignees(&app.board);
            app.filters.assignee = cycle_value(&names, app.filters.assignee.as_deref());
            app.clamp_cursor();
        }
        KeyCode::Char('t') => {
            let tags = search::unique_tags(&app.board);
            let current = app.filters.tags.first().map(|s| s.as_str());
            app.filters.tags = cycle_value(&tags, current).into_iter().collect();
            app.clamp_cursor();
        }
        KeyCode::Esc => {
            app.filters = Default::default();
            app.search_input.clear();
            app.clamp_cursor();
        }
        _ => {}
    }
}

fn move_row(app: &mut App, delta: isize) {
    let count = app.visible_tasks(app.cursor_col).len();
    if count == 0 {
        return;
    }
    app.cursor_row = app
        .cursor_row
        .saturating_add_signed(delta)
        .min(count - 1);
    app.reveal_cursor();
}

fn move_column(app: &mut App, delta: isize) {
    let cols = app.board.columns.len();
    if cols == 0 {
        return;
    }
    app.cursor_col = app.cursor_col.saturating_add_signed(delta).min(cols - 1);
    app.clamp_cursor();
    app.reveal_cursor();
}

fn open_edit(app: &mut App) {
    let Some(task) = app.focused_task() else {
        return;
    };
    let modal = TaskModal::edit(task);
    app.modal = Some(ModalState::new(modal));
    app.mode = Mode::Modal;
}

fn open_create(app: &mut App) {
    let Some(column) = app.focused_column_id().map(|s| s.to_string()) else {
        return;
    };
    let modal = TaskModal::create(&app.board, &column);
    app.modal = Some(ModalState::new(modal));
    app.mode = Mode::Modal;
}

/// none → low → medium → high → urgent → none
fn cycle_priority(current: Option<Priority>) -> Option<Priority> {
    match current {
        None => Some(Priority::Low),
        Some(Priority::Urgent) => None,
        Some(p) => Some(p.next()),
    }
}

/// Step through `values` and back to none
fn cycle_value(values: &[String], current: Option<&str>) -> Option<String> {
    let next = match current {
        None => 0,
        Some(c) => values.iter().position(|v| v == c).map_or(0, |i| i + 1),
    };
    values.get(next).cloned()
}
