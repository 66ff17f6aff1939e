use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::keyboard_drag::aria_label;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (text, color, hint) = match app.mode {
        Mode::Search => (
            format!("/{}\u{258C}", app.search_input),
            app.theme.text_bright,
            "Enter keep  Esc clear",
        ),
        Mode::Modal => (String::new(), app.theme.dim, ""),
        Mode::Navigate => {
            if let Some(msg) = &app.status_message {
                (msg.clone(), app.theme.yellow, "")
            } else {
                (
                    navigate_label(app),
                    app.theme.text,
                    if app.show_key_hints {
                        "Space grab  n new  Enter edit  / search  ? help"
                    } else {
                        "? help"
                    },
                )
            }
        }
    };

    let mut spans = vec![Span::styled(
        unicode::truncate_to_width(&text, width),
        Style::default().fg(color).bg(bg),
    )];
    let content_width = unicode::display_width(&spans[0].content);
    let hint_width = unicode::display_width(hint);
    if !hint.is_empty() && content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// What a screen reader would announce for the current focus
fn navigate_label(app: &App) -> String {
    if let Some(id) = app.drag.dragged_task() {
        let title = app.board.task(id).map_or(id, |t| t.title.as_str());
        return aria_label(title, true);
    }
    match app.focused_task() {
        Some(task) => aria_label(&task.title, false),
        None => String::new(),
    }
}
