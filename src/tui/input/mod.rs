mod grab;
mod modal;
mod mouse;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use super::app::{App, Mode};

// Import all submodule functions into this module's namespace
// so that submodules can access cross-module functions via `use super::*;`
#[allow(unused_imports)]
use grab::*;
#[allow(unused_imports)]
use modal::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use search::*;

pub use mouse::handle_mouse;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status_message = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
        app.should_quit = true;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Modal => handle_modal(app, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UiConfig;
    use crate::ops::sample;
    use crate::ops::form::FormField;
    use crate::model::task::Priority;
    use pretty_assertions::assert_eq;

    fn app() -> App {
        App::new(sample::default_board(), &UiConfig::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn todo_ids(app: &App) -> Vec<String> {
        app.board.columns[0].task_ids.clone()
    }

    #[test]
    fn navigate_between_columns_and_cards() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        assert_eq!(app.focused_task().map(|t| t.id.as_str()), Some("task-2"));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor_row, 1);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.cursor_col, 1);
        assert_eq!(app.cursor_row, 0);
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.cursor_col, 3);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.cursor_col, 2);
        assert!(app.focused_task().is_none());
    }

    #[test]
    fn keyboard_grab_reorders_within_column() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        assert!(app.drag.is_dragging());
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(!app.drag.is_dragging());
        assert_eq!(todo_ids(&app), vec!["task-2", "task-1"]);
        // Cursor follows the dropped card
        assert_eq!(app.focused_task().map(|t| t.id.as_str()), Some("task-1"));
    }

    #[test]
    fn keyboard_grab_moves_across_columns() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.board.columns[2].task_ids, vec!["task-1"]);
        assert_eq!(app.board.task("task-1").unwrap().status, "review");
        assert_eq!(app.cursor_col, 2);
    }

    #[test]
    fn keyboard_grab_cancel_leaves_board() {
        let mut app = app();
        let before = app.board.clone();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Esc);
        assert!(!app.drag.is_dragging());
        assert_eq!(app.board, before);
    }

    #[test]
    fn grab_refused_while_filtered() {
        let mut app = app();
        app.filters.query = "design".into();
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.drag.is_dragging());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn create_task_through_modal() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, Mode::Modal);
        type_str(&mut app, "Write docs");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        let ids = &app.board.columns[1].task_ids;
        assert_eq!(ids.len(), 2);
        let created = app.board.task(&ids[1]).unwrap();
        assert_eq!(created.title, "Write docs");
        assert_eq!(created.status, "in-progress");
        assert_eq!(created.priority, Some(Priority::Medium));
        assert_eq!(app.cursor_row, 1);
    }

    #[test]
    fn empty_title_keeps_modal_open() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Modal);
        let state = app.modal.as_ref().unwrap();
        assert_eq!(state.modal.form.error(FormField::Title), Some("Title is required"));
        assert_eq!(app.board.task_count(), 4);

        // Typing into the title clears its error
        type_str(&mut app, "x");
        let state = app.modal.as_ref().unwrap();
        assert_eq!(state.modal.form.error(FormField::Title), None);
    }

    #[test]
    fn edit_task_changes_status_and_priority() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert!(app.modal.as_ref().unwrap().modal.is_edit());
        // Title -> Description -> Status
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        // Priority
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        let task = app.board.task("task-1").unwrap();
        assert_eq!(task.status, "in-progress");
        assert_eq!(task.priority, Some(Priority::Urgent));
        assert_eq!(app.board.columns[1].task_ids, vec!["task-3", "task-1"]);
        assert_eq!(app.focused_task().map(|t| t.id.as_str()), Some("task-1"));
    }

    #[test]
    fn edit_title_with_cursor_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Home);
        type_str(&mut app, "Now: ");
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Backspace);
        ctrl(&mut app, 'w');
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.board.task("task-1").unwrap().title, "Now: Implement drag and drop");
    }

    #[test]
    fn escape_discards_modal_draft() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "zzz");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.modal.is_none());
        assert_eq!(
            app.board.task("task-1").unwrap().title,
            "Implement drag and drop functionality"
        );
    }

    #[test]
    fn delete_from_modal_needs_confirmation() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        ctrl(&mut app, 'd');
        press(&mut app, KeyCode::Char('n'));
        assert!(app.board.task("task-1").is_some());
        assert_eq!(app.mode, Mode::Modal);

        ctrl(&mut app, 'd');
        press(&mut app, KeyCode::Char('y'));
        assert!(app.board.task("task-1").is_none());
        assert_eq!(todo_ids(&app), vec!["task-2"]);
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn search_filters_live_and_escape_clears() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Search);
        type_str(&mut app, "MODAL");
        assert_eq!(app.filters.query, "MODAL");
        assert_eq!(app.visible_tasks(0).len(), 1);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.focused_task().map(|t| t.id.as_str()), Some("task-2"));

        press(&mut app, KeyCode::Esc);
        assert!(app.filters.is_empty());
        assert_eq!(app.visible_tasks(0).len(), 2);
    }

    #[test]
    fn priority_filter_cycles() {
        let mut app = app();
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.filters.priority, Some(Priority::Low));
        for _ in 0..4 {
            press(&mut app, KeyCode::Char('p'));
        }
        assert_eq!(app.filters.priority, None);
    }

    #[test]
    fn assignee_filter_cycles_through_names() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.filters.assignee.as_deref(), Some("Jane Smith"));
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.filters.assignee.as_deref(), Some("John Doe"));
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.filters.assignee, None);
    }

    #[test]
    fn help_and_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
