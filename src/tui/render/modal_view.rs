use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ops::form::FormField;
use crate::tui::app::{App, ModalState};
use crate::util::unicode;

const LABEL_WIDTH: usize = 14;

/// Render the create/edit form over the board
pub fn render_modal(frame: &mut Frame, app: &App, area: Rect) {
    let Some(state) = &app.modal else {
        return;
    };
    let overlay = super::centered_rect(70, 80, area);
    frame.render_widget(Clear, overlay);

    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .title(Span::styled(
            format!(" {} ", state.modal.title()),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let lines = form_lines(app, state, inner.width as usize);
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}

fn form_lines(app: &App, state: &ModalState, width: usize) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let bg = theme.background;
    let form = &state.modal.form;
    let value_width = width.saturating_sub(LABEL_WIDTH + 1);
    let mut lines = Vec::new();

    for field in FormField::ALL {
        let focused = field == state.field;
        let label_style = if focused {
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim).bg(bg)
        };
        let mut spans = vec![Span::styled(
            format!(" {:<width$}", field.label(), width = LABEL_WIDTH - 1),
            label_style,
        )];

        let value_style = Style::default().fg(theme.text_bright).bg(bg);
        match field {
            FormField::Status => {
                let title = app
                    .board
                    .column(&form.status)
                    .map_or(form.status.as_str(), |c| c.title.as_str());
                spans.extend(select_spans(title, focused, theme.highlight, value_style));
            }
            FormField::Priority => {
                let color = theme.priority_color(form.priority);
                spans.extend(select_spans(
                    form.priority.label(),
                    focused,
                    theme.highlight,
                    value_style.fg(color),
                ));
            }
            _ => spans.extend(text_spans(
                form.value(field),
                focused.then_some(state.cursor),
                value_width,
                value_style,
                theme.highlight,
            )),
        }
        lines.push(Line::from(spans));

        if let Some(err) = form.error(field) {
            lines.push(Line::from(Span::styled(
                format!("{:width$}{}", "", err, width = LABEL_WIDTH + 1),
                Style::default().fg(theme.red).bg(bg),
            )));
        }
    }

    lines.push(Line::from(""));
    if state.confirm_delete {
        lines.push(Line::from(Span::styled(
            " Delete this task? y/n",
            Style::default()
                .fg(theme.red)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )));
    } else {
        let mut hint = String::from(" Enter save  Esc cancel  Tab next field");
        if state.modal.is_edit() {
            hint.push_str("  Ctrl+D delete");
        }
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(theme.dim).bg(bg),
        )));
    }
    lines
}

/// `◀ value ▶` when focused, plain value otherwise
fn select_spans(
    value: &str,
    focused: bool,
    arrow: ratatui::style::Color,
    style: Style,
) -> Vec<Span<'static>> {
    if focused {
        vec![
            Span::styled("\u{25C0} ", style.fg(arrow)),
            Span::styled(value.to_string(), style),
            Span::styled(" \u{25B6}", style.fg(arrow)),
        ]
    } else {
        vec![Span::styled(value.to_string(), style)]
    }
}

/// Field text with a block cursor at `cursor` when focused. Long values
/// scroll so the cursor stays visible.
fn text_spans(
    value: &str,
    cursor: Option<usize>,
    width: usize,
    style: Style,
    cursor_color: ratatui::style::Color,
) -> Vec<Span<'static>> {
    let Some(cursor) = cursor else {
        return vec![Span::styled(unicode::truncate_to_width(value, width), style)];
    };
    let cursor = cursor.min(value.len());
    let (before, after) = value.split_at(cursor);
    // Keep the tail of `before` in view
    let room = width.saturating_sub(1);
    let mut start = 0;
    while unicode::display_width(&before[start..]) > room {
        match unicode::next_grapheme_boundary(before, start) {
            Some(next) => start = next,
            None => break,
        }
    }
    let shown_before = &before[start..];
    let rest = room.saturating_sub(unicode::display_width(shown_before));
    vec![
        Span::styled(shown_before.to_string(), style),
        Span::styled("\u{258C}", style.fg(cursor_color)),
        Span::styled(unicode::truncate_to_width(after, rest), style),
    ]
}
