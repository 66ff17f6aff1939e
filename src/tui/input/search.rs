use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

/// Typing in search mode filters the board live
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Cancel: drop the query, keep the other filters
        (_, KeyCode::Esc) => {
            app.search_input.clear();
            app.filters.query.clear();
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Enter) => {
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Backspace) => {
            app.search_input.pop();
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            app.search_input.clear();
        }
        (KeyModifiers::CONTROL, _) => return,
        (_, KeyCode::Char(c)) => {
            app.search_input.push(c);
        }
        _ => return,
    }
    app.filters.query = app.search_input.clone();
    app.clamp_cursor();
}
