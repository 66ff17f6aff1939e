use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = super::centered_rect(60, 90, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Board", header_style)));
    add_binding(&mut lines, " \u{2190}\u{2192}/hl", "Focus column", key_style, desc_style);
    add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Focus card", key_style, desc_style);
    add_binding(&mut lines, " g/G", "First / last card", key_style, desc_style);
    add_binding(&mut lines, " Enter/e", "Edit card", key_style, desc_style);
    add_binding(&mut lines, " n", "New card in column", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Moving cards", header_style)));
    add_binding(&mut lines, " Space", "Grab focused card", key_style, desc_style);
    add_binding(&mut lines, " Arrows", "Move drop target", key_style, desc_style);
    add_binding(&mut lines, " Enter/Space", "Drop", key_style, desc_style);
    add_binding(&mut lines, " Esc", "Cancel", key_style, desc_style);
    add_binding(&mut lines, " Mouse", "Drag and drop cards", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Filter", header_style)));
    add_binding(&mut lines, " /", "Search title and description", key_style, desc_style);
    add_binding(&mut lines, " p", "Cycle priority filter", key_style, desc_style);
    add_binding(&mut lines, " a", "Cycle assignee filter", key_style, desc_style);
    add_binding(&mut lines, " t", "Cycle tag filter", key_style, desc_style);
    add_binding(&mut lines, " Esc", "Clear filters", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Form", header_style)));
    add_binding(&mut lines, " Tab/S-Tab", "Next / previous field", key_style, desc_style);
    add_binding(&mut lines, " \u{2190}\u{2192}", "Change status or priority", key_style, desc_style);
    add_binding(&mut lines, " Enter", "Save", key_style, desc_style);
    add_binding(&mut lines, " Ctrl+D", "Delete (edit only)", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);
    add_binding(&mut lines, " Ctrl+Q", "Quit from anywhere", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn help_lists_drag_keys() {
        let app = sample_app();
        let output = render_to_string(TERM_W, 40, |frame, area| {
            render_help_overlay(frame, &app, area);
        });
        assert!(output.contains("Key Bindings"));
        assert!(output.contains("Grab focused card"));
        assert!(output.contains("Cycle priority filter"));
    }
}
