use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::ops::form::FormField;
use crate::ops::modal::SaveError;
use crate::tui::app::{App, ModalState, Mode};
use crate::util::unicode;

pub(super) fn handle_modal(app: &mut App, key: KeyEvent) {
    let column_ids: Vec<String> = app.board.columns.iter().map(|c| c.id.clone()).collect();
    let Some(state) = app.modal.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };

    if state.confirm_delete {
        if key.code == KeyCode::Char('y') {
            delete(app);
        } else {
            state.confirm_delete = false;
        }
        return;
    }

    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => close(app),
        (_, KeyCode::Enter) => save(app),
        (KeyModifiers::CONTROL, KeyCode::Char('d')) => {
            if state.modal.is_edit() {
                state.confirm_delete = true;
            }
        }
        (_, KeyCode::Tab) | (_, KeyCode::Down) => state.focus(state.field.next()),
        (_, KeyCode::BackTab) | (_, KeyCode::Up) => state.focus(state.field.prev()),
        _ if state.field.is_text() => edit_text(state, key),
        _ => edit_select(state, key, &column_ids),
    }
}

fn close(app: &mut App) {
    app.modal = None;
    app.mode = Mode::Navigate;
}

fn save(app: &mut App) {
    let Some(state) = app.modal.as_mut() else {
        return;
    };
    let is_edit = state.modal.is_edit();
    match state.modal.save(&mut app.board) {
        Ok(id) => {
            debug!(task = %id, edit = is_edit, "modal saved");
            close(app);
            app.status_message = Some(if is_edit {
                format!("Saved {}", id)
            } else {
                format!("Created {}", id)
            });
            app.focus_task(&id);
        }
        Err(SaveError::Invalid(errors)) => {
            if let Some(first) = errors.keys().next() {
                state.focus(*first);
            }
        }
        Err(SaveError::Store(e)) => {
            app.status_message = Some(e.to_string());
        }
    }
}

fn delete(app: &mut App) {
    let Some(state) = app.modal.take() else {
        return;
    };
    if state.modal.delete(&mut app.board) {
        app.status_message = Some("Task deleted".into());
    }
    app.mode = Mode::Navigate;
    app.clamp_cursor();
}

/// Single-line editing of the focused text field
fn edit_text(state: &mut ModalState, key: KeyEvent) {
    let field = state.field;
    let mut value = state.modal.form.value(field).to_string();
    let mut cursor = state.cursor.min(value.len());

    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => {
            let start = unicode::word_boundary_left(&value, cursor);
            value.replace_range(start..cursor, "");
            cursor = start;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            value.replace_range(..cursor, "");
            cursor = 0;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => cursor = 0,
        (KeyModifiers::CONTROL, KeyCode::Char('e')) | (_, KeyCode::End) => cursor = value.len(),
        (KeyModifiers::CONTROL, _) => return,
        (_, KeyCode::Char(c)) => {
            value.insert(cursor, c);
            cursor += c.len_utf8();
        }
        (_, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&value, cursor) {
                value.replace_range(prev..cursor, "");
                cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = unicode::next_grapheme_boundary(&value, cursor) {
                value.replace_range(cursor..next, "");
            }
        }
        (_, KeyCode::Left) => {
            cursor = unicode::prev_grapheme_boundary(&value, cursor).unwrap_or(0);
        }
        (_, KeyCode::Right) => {
            cursor = unicode::next_grapheme_boundary(&value, cursor).unwrap_or(value.len());
        }
        _ => return,
    }

    if value != state.modal.form.value(field) {
        state.modal.form.set(field, value);
    }
    state.cursor = cursor;
}

/// Left/Right (or Space) cycles the status and priority selects
fn edit_select(state: &mut ModalState, key: KeyEvent, column_ids: &[String]) {
    let forward = match key.code {
        KeyCode::Right | KeyCode::Char(' ') => true,
        KeyCode::Left => false,
        _ => return,
    };
    let form = &mut state.modal.form;
    match state.field {
        FormField::Priority => {
            let p = if forward {
                form.priority.next()
            } else {
                form.priority.prev()
            };
            form.set_priority(p);
        }
        FormField::Status if !column_ids.is_empty() => {
            let len = column_ids.len();
            let next = match column_ids.iter().position(|id| *id == form.status) {
                Some(i) if forward => (i + 1) % len,
                Some(i) => (i + len - 1) % len,
                None => 0,
            };
            form.set(FormField::Status, column_ids[next].clone());
        }
        _ => {}
    }
}
